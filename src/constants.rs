pub mod uploads {

    pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

    /// Headroom on top of the file limit for the other form fields.
    pub const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

    pub const PUBLIC_PREFIX: &str = "/uploads";
}

pub mod limits {
    use std::ops::RangeInclusive;

    pub const YEAR_RANGE: RangeInclusive<i32> = 1870..=2100;

    pub const USERNAME_LENGTH: RangeInclusive<usize> = 3..=50;

    pub const MIN_PASSWORD_LENGTH: usize = 8;
}

pub mod session {

    pub const USER_ID_KEY: &str = "user_id";
}
