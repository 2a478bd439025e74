//! The catalogue query and the city identifiers it may be instantiated with.
//!
//! The query text is fixed; the only variable part is the local name of an ArCo
//! city resource (`https://w3id.org/arco/resource/City/<name>`). That name is
//! spliced into an IRI, so it is checked against a conservative grammar first
//! and only a [`CityId`] can reach [`render_query`].

use std::fmt;
use thiserror::Error;

/// Maximum number of rows the endpoint is asked for.
pub const ROW_CAP: usize = 100;

/// Namespace of ArCo city resources.
pub const CITY_NAMESPACE: &str = "https://w3id.org/arco/resource/City/";

const CITY_PLACEHOLDER: &str = "{city}";

/// Selects one sampled row per cultural property located in the city,
/// Italian labels only, ordered by property IRI.
///
/// The `a-cat:`, `a-cd:`, `a-loc:`, `clvapit:`, `dc:`, `pico:` and `rdfs:` prefixes are
/// left undeclared: the dati.cultura.gov.it Virtuoso endpoint predeclares them, and its
/// bindings are the ones the catalogue data is published under.
pub const QUERY_TEMPLATE: &str = r#"SELECT ?bc
       (SAMPLE(STR(?label)) AS ?label)
       (SAMPLE(?date) AS ?date)
       (SAMPLE(?description) AS ?description)
       (SAMPLE(?historicalInformation) AS ?historicalInformation)
       (SAMPLE(?materialAndTechnique) AS ?materialAndTechnique)
       (SAMPLE(?preview) AS ?preview)
FROM <https://w3id.org/arco/data>
{
  ?bc a-cat:isDescribedByCatalogueRecord ?r ;
      rdfs:label ?label ;
      dc:date ?date ;
      dc:description ?description ;
      a-cd:historicalInformation ?historicalInformation ;
      pico:materialAndTechnique ?materialAndTechnique ;
      pico:preview ?preview ;
      a-loc:hasCulturalPropertyAddress/clvapit:hasCity <https://w3id.org/arco/resource/City/{city}> .
  FILTER (LANG(?label) = "it")
}
GROUP BY ?bc
ORDER BY ?bc
LIMIT 100
"#;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CityIdError {
    #[error("city identifier is empty")]
    Empty,

    #[error("character {ch:?} at position {position} is not allowed in a city identifier")]
    InvalidCharacter { ch: char, position: usize },

    #[error("'%' at position {position} is not followed by two hex digits")]
    MalformedEscape { position: usize },
}

/// Local name of an ArCo city resource, e.g. `Roma` or `Sant'Agata_de'_Goti`.
///
/// Letters and digits from any script are accepted together with `_ - . ~ ' ( ) ,`
/// and `%XX` escapes. Everything that could close the IRI or the query pattern
/// (`>`, whitespace, quotes, braces, backslash, `/ # ?`) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityId(String);

impl CityId {
    pub fn parse(raw: &str) -> Result<Self, CityIdError> {
        if raw.is_empty() {
            return Err(CityIdError::Empty);
        }

        let chars: Vec<(usize, char)> = raw.char_indices().collect();
        let mut i = 0;
        while i < chars.len() {
            let (position, ch) = chars[i];
            if ch == '%' {
                let escaped = chars
                    .get(i + 1..i + 3)
                    .map_or(false, |hex| hex.iter().all(|(_, c)| c.is_ascii_hexdigit()));
                if !escaped {
                    return Err(CityIdError::MalformedEscape { position });
                }
                i += 3;
                continue;
            }
            if !is_allowed(ch) {
                return Err(CityIdError::InvalidCharacter { ch, position });
            }
            i += 1;
        }

        Ok(CityId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full IRI of the city resource.
    pub fn iri(&self) -> String {
        format!("{}{}", CITY_NAMESPACE, self.0)
    }
}

fn is_allowed(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '~' | '\'' | '(' | ')' | ',')
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CityId {
    type Err = CityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CityId::parse(s)
    }
}

/// Instantiate [`QUERY_TEMPLATE`] for `city`.
pub fn render_query(city: &CityId) -> String {
    QUERY_TEMPLATE.replace(CITY_PLACEHOLDER, city.as_str())
}
