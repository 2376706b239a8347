use std::collections::HashMap;

/// Original id under which the synthesized default subject is registered.
/// Source records that carry no subject resolve through this key.
pub(crate) const DEFAULT_SUBJECT_KEY: &str = "__no_subject__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EntityKind {
    Course,
    Subject,
    Student,
    EvaluationType,
    Evaluation,
    Grade,
    Schedule,
}

impl EntityKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            EntityKind::Course => "course",
            EntityKind::Subject => "subject",
            EntityKind::Student => "student",
            EntityKind::EvaluationType => "evaluation_type",
            EntityKind::Evaluation => "evaluation",
            EntityKind::Grade => "grade",
            EntityKind::Schedule => "schedule",
        }
    }
}

#[derive(Debug, Default)]
struct Namespace {
    targets: HashMap<String, String>,
    order: Vec<String>,
}

/// Translation table from source ids to their clones, scoped to a single
/// duplication run.
#[derive(Debug, Default)]
pub(crate) struct IdMap {
    namespaces: HashMap<EntityKind, Namespace>,
}

impl IdMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(
        &mut self,
        kind: EntityKind,
        original_id: impl Into<String>,
        new_id: impl Into<String>,
    ) {
        let namespace = self.namespaces.entry(kind).or_default();
        let original_id = original_id.into();
        if namespace.targets.insert(original_id.clone(), new_id.into()).is_none() {
            namespace.order.push(original_id);
        }
    }

    pub(crate) fn get(&self, kind: EntityKind, original_id: &str) -> Option<&str> {
        self.namespaces.get(&kind)?.targets.get(original_id).map(String::as_str)
    }

    /// The clone registered first under `kind`.
    pub(crate) fn first(&self, kind: EntityKind) -> Option<&str> {
        let namespace = self.namespaces.get(&kind)?;
        let original = namespace.order.first()?;
        namespace.targets.get(original).map(String::as_str)
    }

    pub(crate) fn len(&self, kind: EntityKind) -> usize {
        self.namespaces.get(&kind).map_or(0, |namespace| namespace.targets.len())
    }

    pub(crate) fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    /// Pairs source and persisted ids by position. When the store hands back
    /// fewer rows than it was given only the common prefix is registered.
    pub(crate) fn record_pairs<'a>(
        &mut self,
        kind: EntityKind,
        originals: impl IntoIterator<Item = &'a str>,
        persisted: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let mut paired = 0;
        for (original, clone) in originals.into_iter().zip(persisted) {
            self.put(kind, original, clone);
            paired += 1;
        }
        paired
    }
}
