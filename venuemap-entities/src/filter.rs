/// The currently active filters of the venue list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free text, matched case-insensitively as a substring
    pub text: String,
    pub category: Option<String>,
    pub region: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.category.is_none() && self.region.is_none()
    }

    /// The normalized text query or `None` if blank.
    pub fn query(&self) -> Option<String> {
        let query = self.text.trim().to_lowercase();
        if query.is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
