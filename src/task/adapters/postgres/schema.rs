//! Diesel schema for task persistence.

diesel::table! {
    /// Task records owned by authenticated users.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Owning user identifier.
        user_id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Completion marker.
        completed_at -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}
