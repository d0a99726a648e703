//! Insertion-order sorting service
//!
//! Decodes records, builds the hierarchy, optionally validates it and
//! flattens it into an order where every parent precedes its children.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::codec::{decode_records, encode_records};
use crate::application::ApplicationResult;
use crate::domain::{
    validate, FieldNames, HierarchyArena, HierarchyBuilder, LevelOrderFlattener, Record,
    Traversal, ValidationMode,
};

/// Options controlling a sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub fields: FieldNames,
    pub traversal: Traversal,
    pub validation: ValidationMode,
    /// Pretty-print encoded output
    pub pretty: bool,
}

impl SortOptions {
    pub fn with_fields(mut self, id: impl Into<String>, parent: impl Into<String>) -> Self {
        self.fields = FieldNames::new(id, parent);
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Service for ordering hierarchical records for insertion.
///
/// Holds no state between calls; every call builds its own lookup map,
/// arena and work queue.
#[derive(Debug, Clone, Default)]
pub struct SortService {
    options: SortOptions,
}

impl SortService {
    pub fn new(options: SortOptions) -> Self {
        Self { options }
    }

    /// Build (and, in strict mode, validate) the hierarchy for `records`.
    #[instrument(level = "debug", skip(self, records))]
    pub fn build_hierarchy(&self, records: Vec<Record>) -> ApplicationResult<HierarchyArena> {
        let builder = HierarchyBuilder::new(self.options.fields.clone());
        let hierarchy = builder.build(records)?;
        if self.options.validation == ValidationMode::Strict {
            validate(&hierarchy)?;
        }
        Ok(hierarchy)
    }

    /// Order records so that parents precede their descendants.
    #[instrument(level = "debug", skip(self, records), fields(count = records.len()))]
    pub fn sort_records(&self, records: Vec<Record>) -> ApplicationResult<Vec<Record>> {
        let hierarchy = self.build_hierarchy(records)?;
        Ok(self.flatten(hierarchy))
    }

    /// Flatten an already built hierarchy.
    pub fn flatten(&self, hierarchy: HierarchyArena) -> Vec<Record> {
        let ordered = LevelOrderFlattener::new(self.options.traversal).flatten(hierarchy);
        debug!(
            order = %ordered
                .iter()
                .filter_map(|r| r.get(&self.options.fields.id))
                .join(", "),
            "insertion order"
        );
        ordered
    }

    /// Decode a JSON array, sort it and encode the result.
    #[instrument(level = "debug", skip_all)]
    pub fn sort_json(&self, input: &str) -> ApplicationResult<String> {
        let records = decode_records(input)?;
        let ordered = self.sort_records(records)?;
        encode_records(&ordered, self.options.pretty)
    }
}
