/// Three-state update for optional fields.
///
/// - `NoChange`: keep the existing value
/// - `Set(value)`: replace it
/// - `Clear`: set it to `None`
///
/// # Example
///
/// ```
/// use taskboard_domain::FieldUpdate;
///
/// let mut description = Some("old".to_string());
/// FieldUpdate::Set("new".to_string()).apply_to(&mut description);
/// assert_eq!(description.as_deref(), Some("new"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut description);
/// assert_eq!(description, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Build an update from a `--value` / `--clear-value` flag pair.
    /// Clearing wins when both are given.
    pub fn from_flags(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldUpdate::Clear,
            (Some(value), false) => FieldUpdate::Set(value),
            (None, false) => FieldUpdate::NoChange,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            FieldUpdate::NoChange => FieldUpdate::NoChange,
            FieldUpdate::Set(value) => FieldUpdate::Set(f(value)),
            FieldUpdate::Clear => FieldUpdate::Clear,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
