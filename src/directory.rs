use crate::models::Contact;

/// Number of contacts shown above the "Recently active" heading.
pub const FIRST_GROUP_LEN: usize = 2;

/// Fixed, ordered list of contacts backing the People screen.
///
/// Built once at startup and only ever lent out by reference. Order is
/// display order; names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        ContactDirectory { contacts }
    }

    /// The sample people shown on the screen.
    pub fn sample() -> Self {
        ContactDirectory::new(vec![
            Contact::new("martha-craig", "Martha Craig")
                .with_avatar("avatar_martha_craig.png")
                .online(),
            Contact::new("jamie-franco", "Jamie Franco")
                .with_avatar("avatar_jamie_franco.png")
                .online(),
            Contact::new("kieron-dotson", "Kieron Dotson")
                .with_avatar("avatar_kieron_dotson.png")
                .with_online_status("8 min."),
            Contact::new("zack-john", "Zack John")
                .with_avatar("avatar_zack_john.png")
                .with_online_status("10 min."),
            Contact::new("tabitha-potter", "Tabitha Potter")
                .with_avatar("avatar_tabitha_potter.png")
                .with_online_status("10 min."),
            Contact::new("albert-lasker", "Albert Lasker")
                .with_avatar("avatar_albert_lasker.png")
                .with_online_status("30 min."),
        ])
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn first_group(&self) -> &[Contact] {
        &self.contacts[..self.split_point()]
    }

    pub fn second_group(&self) -> &[Contact] {
        &self.contacts[self.split_point()..]
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    fn split_point(&self) -> usize {
        FIRST_GROUP_LEN.min(self.contacts.len())
    }
}

impl<'a> IntoIterator for &'a ContactDirectory {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_of(len: usize) -> ContactDirectory {
        ContactDirectory::new(
            (0..len)
                .map(|i| Contact::new(&format!("c{}", i), &format!("Contact {}", i)))
                .collect(),
        )
    }

    #[test]
    fn test_sample_groups() {
        let directory = ContactDirectory::sample();

        let first: Vec<&str> = directory.first_group().iter().map(|c| c.name.as_str()).collect();
        let second: Vec<&str> = directory.second_group().iter().map(|c| c.name.as_str()).collect();

        assert_eq!(first, vec!["Martha Craig", "Jamie Franco"]);
        assert_eq!(second, vec!["Kieron Dotson", "Zack John", "Tabitha Potter", "Albert Lasker"]);
        assert_eq!(directory.second_group().len(), 4);
    }

    #[test]
    fn test_group_sizes_for_every_length() {
        for len in 0..8 {
            let directory = directory_of(len);
            assert_eq!(directory.first_group().len(), len.min(2), "len {}", len);
            assert_eq!(directory.second_group().len(), len.saturating_sub(2), "len {}", len);

            let rejoined: Vec<Contact> = directory
                .first_group()
                .iter()
                .chain(directory.second_group())
                .cloned()
                .collect();
            assert_eq!(rejoined.as_slice(), directory.all());
        }
    }

    #[test]
    fn test_all_is_stable() {
        let directory = ContactDirectory::sample();
        assert_eq!(directory.all(), directory.all());
        assert_eq!(directory.len(), 6);
        assert!(!directory.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let directory = ContactDirectory::new(vec![
            Contact::new("a", "Sam"),
            Contact::new("b", "Sam"),
            Contact::new("c", "Sam"),
        ]);
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.second_group()[0].id.as_str(), "c");
    }
}
