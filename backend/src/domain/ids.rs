//! UUID-backed identifiers for front office records.

macro_rules! uuid_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(value).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Staff account identifier.
    UserId
);
uuid_id!(
    /// Room record identifier. Reservations reference rooms by number instead.
    RoomId
);
uuid_id!(
    /// Guest ledger identifier.
    GuestId
);
uuid_id!(
    /// Reservation identifier; its first eight characters form the invoice number.
    ReservationId
);
uuid_id!(
    /// Ledger transaction identifier.
    TransactionId
);
uuid_id!(
    /// Payroll staff member identifier.
    StaffId
);
uuid_id!(
    /// Salary payment identifier.
    SalaryPaymentId
);
