// src/severity/count_map.rs
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Label -> count mapping that keeps insertion order.
///
/// Text-derived counts are seeded with every label of their taxonomy (in canonical
/// order) so absent labels read as zero. Structured extractors insert labels as they
/// are first seen, which keeps header order or first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, u64)>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding every label at zero, in the given order.
    pub fn with_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        for label in labels {
            if !map.contains(label) {
                map.entries.push((label.to_string(), 0));
            }
        }
        map
    }

    /// Adds `n` to `label`, appending the label if it has not been seen yet.
    pub fn add(&mut self, label: &str, n: u64) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += n,
            None => self.entries.push((label.to_string(), n)),
        }
    }

    pub fn set(&mut self, label: &str, n: u64) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count = n,
            None => self.entries.push((label.to_string(), n)),
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

impl<'a> IntoIterator for &'a CountMap {
    type Item = (&'a str, u64);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, u64)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// One `label: count` line per entry, as presented to operators.
impl fmt::Display for CountMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", label, count)?;
        }
        Ok(())
    }
}
