/// A four-field contact unit: first name, last name, email, phone. Used for
/// both the manager/rep and coach contacts, before and after repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuad {
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
}

impl ContactQuad {
    /// A quad counts as present when any of its four fields survived
    /// cleaning.
    pub fn is_present(&self) -> bool {
        !self.first.is_empty()
            || !self.last.is_empty()
            || !self.email.is_empty()
            || !self.phone.is_empty()
    }

    /// All four fields populated.
    pub fn is_complete(&self) -> bool {
        !self.first.is_empty()
            && !self.last.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
    }

    /// Blank all four fields. Suppression is all-or-nothing; a partially
    /// populated coach group would be rejected downstream.
    pub fn clear(&mut self) {
        self.first.clear();
        self.last.clear();
        self.email.clear();
        self.phone.clear();
    }
}

/// Split a full name at the first whitespace boundary: first token becomes
/// the first name, the remainder is re-joined as the last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let Some(first) = parts.next() else {
        return (String::new(), String::new());
    };
    let last = parts.collect::<Vec<_>>().join(" ");
    (first.to_string(), last)
}
