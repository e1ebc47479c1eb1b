use chrono::{DateTime, Utc};
use sea_orm::ActiveValue;

/// Stamps `created_at` on insert and `updated_at` on every save.
pub(crate) fn touch(
    created_at: &mut ActiveValue<DateTime<Utc>>,
    updated_at: &mut ActiveValue<DateTime<Utc>>,
    insert: bool,
) {
    let now = Utc::now();

    if insert && !created_at.is_set() {
        *created_at = ActiveValue::Set(now);
    }

    *updated_at = ActiveValue::Set(now);
}
