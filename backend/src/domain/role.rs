//! Staff roles and what each may do.

use super::Error;
use super::labels::labelled_enum;

labelled_enum! {
    /// Role assigned to a staff account.
    pub enum Role ("role") {
        /// Full access, including payroll and user administration.
        Admin => "ADMIN",
        /// Runs reservations, guests and housekeeping.
        FrontDesk => "FRONT_DESK",
        /// Read access to billing and fiscal reports.
        Accountant => "ACCOUNTANT",
    }
}

/// Guarded capability checked by services before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Status board, invoices, transactions, reports.
    ViewOperations,
    /// Create and progress reservations, edit guests, set room status.
    ManageFrontDesk,
    /// Destructive actions on reservations and guests.
    DeleteRecords,
    /// Staff and salary payments.
    ManagePayroll,
    /// Staff accounts.
    ManageUsers,
    /// Room catalogue: numbers, categories, rates.
    ManageRooms,
}

impl Capability {
    fn describe(self) -> &'static str {
        match self {
            Self::ViewOperations => "view operations",
            Self::ManageFrontDesk => "manage front desk records",
            Self::DeleteRecords => "delete records",
            Self::ManagePayroll => "manage payroll",
            Self::ManageUsers => "manage users",
            Self::ManageRooms => "manage the room catalogue",
        }
    }
}

impl Role {
    /// Whether this role holds `capability`.
    #[must_use]
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::ViewOperations => true,
            Capability::ManageFrontDesk => matches!(self, Self::Admin | Self::FrontDesk),
            Capability::DeleteRecords
            | Capability::ManagePayroll
            | Capability::ManageUsers
            | Capability::ManageRooms => matches!(self, Self::Admin),
        }
    }

    /// Return `forbidden` unless this role holds `capability`.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::{Capability, ErrorCode, Role};
    ///
    /// assert!(Role::FrontDesk.require(Capability::ManageFrontDesk).is_ok());
    /// let err = Role::Accountant.require(Capability::ManagePayroll).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn require(self, capability: Capability) -> Result<(), Error> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "role {self} may not {}",
                capability.describe()
            )))
        }
    }
}
