/// Length of the id prefix shown when a booking has no human-readable number.
const SHORT_ID_LEN: usize = 6;

pub trait ShortId {
    /// First few characters of an opaque id, for compact display.
    fn short_id(&self) -> &str;
}

impl ShortId for str {
    fn short_id(&self) -> &str {
        let cut = self
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map(|(i, _)| i)
            .unwrap_or(self.len());
        &self[..cut]
    }
}

impl ShortId for String {
    fn short_id(&self) -> &str {
        self.as_str().short_id()
    }
}
