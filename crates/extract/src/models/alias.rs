/// One spelling of a photographer's slug and the display name it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AuthorAlias {
    /// Lower-case, hyphenated spelling as found in filenames.
    pub slug: String,
    /// Display name written to the catalog.
    pub name: String,
}
impl AuthorAlias {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }

    /// The slug with hyphens replaced by spaces, as authors are sometimes
    /// written out in plain words.
    pub fn spaced(&self) -> String {
        self.slug.replace('-', " ")
    }
}

/// Ordered, many-to-one mapping from slug aliases to display names.
///
/// Order is significant: partial matches are tried in table order and the
/// first hit wins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AliasTable(Vec<AuthorAlias>);
impl AliasTable {
    pub fn new(aliases: impl IntoIterator<Item = AuthorAlias>) -> Self {
        Self(aliases.into_iter().collect())
    }

    /// Exact lookup of a slug.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.0.iter().find(|alias| alias.slug == slug).map(|alias| alias.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorAlias> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Default for AliasTable {
    fn default() -> Self {
        Self::new(
            [
                ("alfred-stieglitz", "Alfred Stieglitz"),
                ("baron-wilhelm-von-gloeden", "Baron Wilhelm Von Gloeden"),
                ("clarence-hudson-white", "Clarence Hudson White"),
                ("clarence-h-white", "Clarence Hudson White"),
                ("edward-weston", "Edward Weston"),
                ("eugene-durieu", "Eugene Durieu"),
                ("durieu-eugene", "Eugene Durieu"),
                ("durieu", "Eugene Durieu"),
                ("felix-jacques-moulin", "Felix Jacques Moulin"),
                ("moulin", "Felix Jacques Moulin"),
                ("felix-moulin", "Felix Jacques Moulin"),
                ("fred-holland-day", "Fred Holland Day"),
                ("robert-demachy", "Robert Demachy"),
                ("demachy", "Robert Demachy"),
                ("wilhelm-von-plueschow", "Wilhelm Von Plueschow"),
                ("wilhelm-von-gloeden", "Baron Wilhelm Von Gloeden"),
                ("jane-de-la-vaudere", "Jane de La Vaudère"),
                ("vaudere", "Jane de La Vaudère"),
                ("anne-brigman", "Anne Brigman"),
                ("mario-von-bucovich-atelier-karl-schenker", "Mario von Bucovich"),
                ("mario-von-bucovich", "Mario von Bucovich"),
            ]
            .into_iter()
            .map(|(slug, name)| AuthorAlias::new(slug, name)),
        )
    }
}
impl FromIterator<AuthorAlias> for AliasTable {
    fn from_iter<I: IntoIterator<Item = AuthorAlias>>(iter: I) -> Self {
        Self::new(iter)
    }
}
