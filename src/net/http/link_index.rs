use super::link::Link;
use std::collections::BTreeMap;

/// Links grouped by relation; relation lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    links: BTreeMap<String, Vec<Link>>,
}

fn key(relation: &str) -> String {
    relation.trim().to_lowercase()
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adding a link equal to one already indexed under the same relation is a no-op
    pub fn add(&mut self, link: Link) -> &mut Self {
        let links = self.links.entry(key(link.relation())).or_default();
        if !links.contains(&link) {
            links.push(link);
            links.sort_by(Link::compare);
        }
        self
    }

    pub fn add_all<I: IntoIterator<Item = Link>>(&mut self, links: I) -> &mut Self {
        for link in links {
            self.add(link);
        }
        self
    }

    pub fn find(&self, relation: &str) -> Option<&Link> {
        self.links.get(&key(relation)).and_then(|links| links.first())
    }

    pub fn find_all(&self, relation: &str) -> &[Link] {
        self.links
            .get(&key(relation))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn to_list(&self) -> Vec<Link> {
        let mut list: Vec<Link> = self.iter().cloned().collect();
        list.sort_by(Link::compare);
        list
    }

    /// Links keyed by the relation they were indexed under, in its original case
    pub fn to_map(&self) -> BTreeMap<String, Vec<Link>> {
        self.links
            .values()
            .filter_map(|links| {
                links
                    .first()
                    .map(|first| (first.relation().to_string(), links.clone()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a LinkIndex {
    type Item = &'a Link;
    type IntoIter = Box<dyn Iterator<Item = &'a Link> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<Link> for LinkIndex {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        let mut index = LinkIndex::new();
        index.add_all(iter);
        index
    }
}
