/// A web citation attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    /// Returns `None` unless both the link and the title are non-empty.
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Option<Self> {
        let uri = uri.into();
        let title = title.into();
        if uri.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self { uri, title })
    }
}
