/// Outcome of a combined list-or-find query.
///
/// Produced by the `get_*` methods on [`ExportProvider`](crate::ExportProvider):
/// without a name the query lists, with a name it finds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a, T> {
    /// Every entity in scope, in declaration order.
    All(Vec<&'a T>),
    /// The first entity in scope with the requested name.
    One(&'a T),
    /// A name was requested and nothing in scope carries it.
    NotFound,
}

impl<'a, T> Lookup<'a, T> {
    pub(crate) fn found(item: Option<&'a T>) -> Self {
        item.map_or(Self::NotFound, Self::One)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Number of entities carried: the list length, 1 or 0.
    pub fn len(&self) -> usize {
        match self {
            Self::All(items) => items.len(),
            Self::One(_) => 1,
            Self::NotFound => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single match, if this is a find result.
    pub fn one(&self) -> Option<&'a T> {
        match self {
            Self::One(item) => Some(*item),
            _ => None,
        }
    }

    /// Flattens into a list regardless of shape.
    pub fn into_vec(self) -> Vec<&'a T> {
        match self {
            Self::All(items) => items,
            Self::One(item) => vec![item],
            Self::NotFound => Vec::new(),
        }
    }
}
