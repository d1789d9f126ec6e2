//! transport プロファイル名の newtype

/// プロファイル名（http / demo）。解決は配線で行う
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileName(pub String);

impl ProfileName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for ProfileName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
