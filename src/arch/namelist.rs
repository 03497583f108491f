use binrw::binrw;

use super::Ascii;

/// A `name-list` as defined in the SSH protocol,
/// a `,`-separated list of **ASCII** identifiers.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4251#section-5>.
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameList<'b>(pub Ascii<'b>);

impl NameList<'_> {
    /// Retrieve the first name from `self` that is also in `other`.
    pub fn preferred_in(&self, other: &Self) -> Option<&str> {
        self.into_iter()
            .find(|&name| other.into_iter().any(|n| name == n))
    }
}

impl<A> FromIterator<A> for NameList<'_>
where
    A: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self(
            Ascii::owned(
                iter.into_iter()
                    .map(|item| item.as_ref().to_owned())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
                    .join(","),
            )
            .expect("unable to collect the iterator into a `NameList`"),
        )
    }
}

impl<'a: 'b, 'b> IntoIterator for &'a NameList<'b> {
    type Item = &'b str;

    type IntoIter = std::iter::Filter<std::str::Split<'b, char>, for<'f> fn(&'f &'b str) -> bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.as_ref().split(',').filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use binrw::{BinRead, BinWrite};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[], b"\x00\x00\x00\x00")]
    #[case(&["none"], b"\x00\x00\x00\x04none")]
    #[case(
        &["zlib", "none"],
        b"\x00\x00\x00\x09zlib,none"
    )]
    fn it_writes_comma_joined_names(#[case] names: &[&str], #[case] expected: &[u8]) {
        let list = names.iter().collect::<NameList>();

        let mut cursor = std::io::Cursor::new(Vec::new());
        list.write_be(&mut cursor).unwrap();

        assert_eq!(cursor.into_inner(), expected);
    }

    #[rstest]
    #[case(&[])]
    #[case(&["none"])]
    #[case(&["hmac-sha1", "hmac-md5"])]
    fn it_round_trips(#[case] names: &[&str]) {
        let list = names.iter().collect::<NameList>();

        let mut cursor = std::io::Cursor::new(Vec::new());
        list.write_be(&mut cursor).unwrap();
        cursor.set_position(0);

        let read = NameList::read_be(&mut cursor).unwrap();

        assert_eq!(read.into_iter().collect::<Vec<_>>(), names);
    }

    #[rstest]
    #[case(&["b", "a"], &["a", "b"], Some("b"))]
    #[case(&["a", "b"], &["b"], Some("b"))]
    #[case(&["a"], &["b"], None)]
    #[case(&[], &["a"], None)]
    fn it_selects_our_preference(
        #[case] ours: &[&str],
        #[case] theirs: &[&str],
        #[case] expected: Option<&str>,
    ) {
        let ours = ours.iter().collect::<NameList>();
        let theirs = theirs.iter().collect::<NameList>();

        assert_eq!(ours.preferred_in(&theirs), expected);
    }
}
