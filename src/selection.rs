/// Image URLs marked for batch download.
///
/// Membership is unique. Iteration follows insertion order, which is the
/// order the preview renders and the order downloads are processed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    urls: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    /// Adds `url` if absent, removes it otherwise. Returns the new membership.
    pub fn toggle(&mut self, url: &str) -> bool {
        if let Some(pos) = self.urls.iter().position(|u| u == url) {
            self.urls.remove(pos);
            false
        } else {
            self.urls.push(url.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.urls.clone()
    }
}
