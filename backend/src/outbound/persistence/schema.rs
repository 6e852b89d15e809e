//! Diesel table definitions matching `migrations/`.
//!
//! Keep in step with the SQL by hand or regenerate with
//! `diesel print-schema`. Money columns are `BIGINT` paisa.

diesel::table! {
    rooms (id) {
        id -> Uuid,
        number -> Varchar,
        category -> Text,
        rate -> Int8,
        status -> Text,
    }
}

diesel::table! {
    guests (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
        id_type -> Text,
        id_number -> Text,
        address -> Text,
        city -> Text,
        country -> Text,
        preferences -> Nullable<Text>,
        id_image_url -> Nullable<Text>,
        outstanding_balance -> Int8,
    }
}

diesel::table! {
    /// Stays. Room numbers and guest ids are arrays so a group booking is a
    /// single row.
    reservations (id) {
        id -> Uuid,
        room_numbers -> Array<Text>,
        guest_ids -> Array<Uuid>,
        check_in -> Date,
        check_out -> Date,
        status -> Text,
        stay_type -> Text,
        laundry -> Int8,
        mini_bar -> Int8,
        extra_charges -> Int8,
        discount -> Int8,
        paid_amount -> Int8,
        payment_method -> Nullable<Text>,
        on_duty_officer -> Nullable<Text>,
        special_requests -> Nullable<Text>,
        notes -> Nullable<Text>,
        total_amount -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    transactions (id) {
        id -> Uuid,
        occurred_at -> Timestamptz,
        room_label -> Text,
        guest_name -> Text,
        kind -> Text,
        amount -> Int8,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Text,
        name -> Text,
        role -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    staff (id) {
        id -> Uuid,
        name -> Text,
        designation -> Text,
        joining_date -> Date,
        base_salary -> Int8,
        bonus -> Int8,
        deductions -> Int8,
    }
}

diesel::table! {
    salary_payments (id) {
        id -> Uuid,
        staff_id -> Uuid,
        month -> Text,
        year -> Int4,
        amount -> Int8,
        status -> Text,
        paid_at -> Timestamptz,
    }
}

diesel::table! {
    fiscal_days (date) {
        date -> Date,
        token_adjustment -> Int8,
        closed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(salary_payments -> staff (staff_id));

diesel::allow_tables_to_appear_in_same_query!(
    fiscal_days,
    guests,
    reservations,
    rooms,
    salary_payments,
    staff,
    transactions,
    users,
);
