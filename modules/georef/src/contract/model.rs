use crate::names as N;
use georef_params::ParamValue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One matched document as returned by the search backend.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Resource kinds exposed by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    States,
    Departments,
    Municipalities,
    Localities,
    Streets,
    Addresses,
    Places,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::States,
        Resource::Departments,
        Resource::Municipalities,
        Resource::Localities,
        Resource::Streets,
        Resource::Addresses,
        Resource::Places,
    ];

    /// Public name; also the key of the bulk list in a request body.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::States => N::STATES,
            Resource::Departments => N::DEPARTMENTS,
            Resource::Municipalities => N::MUNICIPALITIES,
            Resource::Localities => N::LOCALITIES,
            Resource::Streets => N::STREETS,
            Resource::Addresses => N::ADDRESSES,
            Resource::Places => N::PLACES,
        }
    }

    /// Key the formatter uses for the results of this resource.
    pub const fn result_key(self) -> &'static str {
        match self {
            Resource::Places => N::PLACE,
            other => other.name(),
        }
    }

    /// Source attribution of the index behind this resource. Places are
    /// resolved against department polygons.
    pub const fn source(self) -> &'static str {
        match self {
            Resource::States
            | Resource::Departments
            | Resource::Municipalities
            | Resource::Places => N::SOURCE_IGN,
            Resource::Localities => N::SOURCE_BAHRA,
            Resource::Streets | Resource::Addresses => N::SOURCE_INDEC,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}

/// Backend-agnostic description of what to search for.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryDescriptor(BTreeMap<String, ParamValue>);

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Requested backend fields, if the query restricts them.
    pub fn fields(&self) -> Option<&[String]> {
        self.get("fields").and_then(ParamValue::as_list)
    }
}

impl FromIterator<(String, ParamValue)> for QueryDescriptor {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mapping of a (dotted) field path to its CSV column name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CsvColumn {
    pub field: &'static str,
    pub column: &'static str,
}

/// How results should be presented.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormatDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatten: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Only set when the output format is CSV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_fields: Option<&'static [CsvColumn]>,
}

/// Query and presentation derived from one parsed record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestPlan {
    pub query: QueryDescriptor,
    pub format: FormatDescriptor,
}

/// Point computed along a street geometry for a door number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Location {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Matches {
    List(Vec<Record>),
    /// Place lookups always produce exactly one record.
    Single(Record),
}

impl Matches {
    pub fn len(&self) -> usize {
        match self {
            Matches::List(records) => records.len(),
            Matches::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Results of one logical request, ready for the formatter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultSet {
    pub matches: Matches,
    pub format: FormatDescriptor,
}
