use std::fmt;

/// Stable identifier for a contact, independent of its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: &str) -> Self {
        ContactId(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle naming an avatar image asset (a file name in the assets directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarAsset(String);

impl AvatarAsset {
    pub fn new(handle: &str) -> Self {
        AvatarAsset(handle.to_string())
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub avatar: Option<AvatarAsset>,
    pub online_status: Option<String>, // e.g. "8 min.", shown instead of the online dot
    pub is_online: bool,
}

/// What the row shows next to the avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence<'a> {
    Online,                 // plain dot
    RecentlyActive(&'a str), // status badge
    Offline,
}

impl Contact {
    pub fn new(id: &str, name: &str) -> Self {
        Contact {
            id: ContactId::new(id),
            name: name.to_string(),
            avatar: None,
            online_status: None,
            is_online: false,
        }
    }

    pub fn with_avatar(mut self, handle: &str) -> Self {
        self.avatar = Some(AvatarAsset::new(handle));
        self
    }

    pub fn online(mut self) -> Self {
        self.is_online = true;
        self
    }

    /// Marks the contact online with a "last active" label.
    ///
    /// Sets `is_online` as well, which keeps the record consistent with the
    /// way the badge is meant to be displayed. Callers building records by
    /// hand are free to break that pairing; nothing validates it.
    pub fn with_online_status(mut self, label: &str) -> Self {
        self.online_status = Some(label.to_string());
        self.is_online = true;
        self
    }

    /// The badge wins over the dot whenever a label is present.
    pub fn presence(&self) -> Presence<'_> {
        match (&self.online_status, self.is_online) {
            (Some(label), _) => Presence::RecentlyActive(label.as_str()),
            (None, true) => Presence::Online,
            (None, false) => Presence::Offline,
        }
    }
}
