//! Diesel table definitions.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! regenerates them from a migrated database.

diesel::table! {
    /// Contamination measurements keyed by postal code.
    water_quality_metrics (id) {
        id -> Int4,
        /// German postal code.
        plz -> Varchar,
        city -> Text,
        contamination_type -> Text,
        measured_value -> Numeric,
        unit -> Text,
        /// Regulatory limit in the same unit as `measured_value`.
        limit_value -> Numeric,
        measurement_date -> Date,
        data_source -> Text,
        /// One of `low`, `medium`, `high`, `critical`.
        risk_level -> Text,
        legal_advice -> Nullable<Text>,
    }
}

diesel::table! {
    /// Filter products offered in the catalogue.
    filter_products (id) {
        id -> Int4,
        name -> Text,
        brand -> Text,
        description -> Text,
        price -> Numeric,
        image_url -> Nullable<Text>,
        affiliate_link -> Nullable<Text>,
        /// One of `under-sink`, `table-top`, `whole-house`.
        category -> Text,
    }
}

diesel::table! {
    /// Lab-tested removal rates. `filter_id` is a weak reference.
    filter_performance (id) {
        id -> Int4,
        filter_id -> Nullable<Int4>,
        contaminant -> Text,
        removal_rate -> Numeric,
        certification -> Nullable<Text>,
    }
}

diesel::table! {
    /// Postal-code searches recorded per user.
    user_scans (id) {
        id -> Int4,
        /// Identifier issued by the external auth provider.
        user_id -> Text,
        plz -> Varchar,
        scanned_at -> Timestamptz,
        is_saved -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(filter_products, filter_performance);
