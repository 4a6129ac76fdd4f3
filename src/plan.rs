//! Query plans and their extracted metadata.
//!
//! A [`Plan`] is built once by [`PlanBuilder`]: the predicate is validated
//! against the schema, analyzed into an [`ExtractedPlanInfo`], and the result
//! is frozen behind an `Arc` so segment workers can read it concurrently.

pub mod config;
pub mod node;
pub mod plan_info;

pub use config::AnalyzerConfig;
pub use node::{MetricType, PlanNode, RetrievePlanNode, SearchInfo, VectorPlanNode};
pub use plan_info::{Eligibility, ExtractedPlanInfo};

use crate::error::{PlanError, PlanResult};
use crate::expression::VerifyExprVisitor;
use crate::schema::{FieldId, Schema};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Builds immutable plans against a schema
pub struct PlanBuilder {
    schema: Arc<Schema>,
    config: AnalyzerConfig,
}

impl PlanBuilder {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            config: AnalyzerConfig::default(),
        }
    }

    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate `node`, extract its info and freeze the result
    pub fn build(&self, node: PlanNode, target_entries: Vec<FieldId>) -> PlanResult<Plan> {
        if let Err(e) = self.validate(&node, &target_entries) {
            warn!("Rejected plan: {}", e);
            return Err(e);
        }

        let extracted_info = node.extract_info(&self.config)?;
        debug!(
            "Built plan over {} field(s): cross_field={}, index_servable={}",
            extracted_info.len(),
            extracted_info.has_cross_field_compare(),
            extracted_info.is_index_servable()
        );

        Ok(Plan {
            schema: self.schema.clone(),
            node,
            target_entries,
            extracted_info: Arc::new(extracted_info),
        })
    }

    fn validate(&self, node: &PlanNode, target_entries: &[FieldId]) -> PlanResult<()> {
        // depth goes first so an over-deep tree is never walked in full
        if let (Some(limit), Some(predicate)) = (self.config.max_depth, node.predicate()) {
            if predicate.exceeds_depth(limit) {
                return Err(PlanError::ExpressionTooDeep { limit });
            }
        }

        if let PlanNode::VectorSearch(search) = node {
            let meta = self
                .schema
                .get(search.field_id)
                .ok_or(PlanError::UndefinedField(search.field_id))?;
            if !meta.data_type.is_vector() {
                return Err(PlanError::NotAVectorField(search.field_id));
            }
            if search.search_info.topk == 0 {
                return Err(PlanError::invalid_tree("topk must be positive"));
            }
        }

        if let Some(predicate) = node.predicate() {
            VerifyExprVisitor::with_config(&self.schema, &self.config).verify(predicate)?;
        }

        for &field_id in target_entries {
            if !self.schema.contains(field_id) {
                return Err(PlanError::UndefinedField(field_id));
            }
        }
        Ok(())
    }
}

/// Wire form of a plan. Extracted info is recomputed on decode.
#[derive(Serialize, Deserialize)]
struct EncodedPlan {
    schema: Schema,
    node: PlanNode,
    target_entries: Vec<FieldId>,
}

/// A validated, analyzed query plan. Immutable once built.
#[derive(Debug, Clone)]
pub struct Plan {
    schema: Arc<Schema>,
    node: PlanNode,
    target_entries: Vec<FieldId>,
    extracted_info: Arc<ExtractedPlanInfo>,
}

impl Plan {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn node(&self) -> &PlanNode {
        &self.node
    }

    /// Output fields requested by the query
    pub fn target_entries(&self) -> &[FieldId] {
        &self.target_entries
    }

    /// Shared handle to the frozen plan info
    pub fn extracted_info(&self) -> Arc<ExtractedPlanInfo> {
        Arc::clone(&self.extracted_info)
    }

    /// Fields a segment has to materialize: predicate and search fields plus
    /// the requested outputs, ascending and deduplicated
    pub fn fields_to_load(&self) -> Vec<FieldId> {
        let mut fields: Vec<FieldId> = self
            .extracted_info
            .involved_fields()
            .chain(self.target_entries.iter().copied())
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }

    pub fn encode(&self) -> PlanResult<Vec<u8>> {
        let encoded = EncodedPlan {
            schema: (*self.schema).clone(),
            node: self.node.clone(),
            target_entries: self.target_entries.clone(),
        };
        Ok(bincode::serialize(&encoded)?)
    }

    /// Decode a plan and rebuild its info. The encoded bytes are validated
    /// exactly like a freshly built plan.
    ///
    /// bincode 1 deserializes nested `Expr` values recursively with no depth
    /// limit; `config.max_depth` only applies once the tree is decoded, so
    /// bytes from untrusted sources should be size-limited by the caller.
    pub fn decode(data: &[u8], config: AnalyzerConfig) -> PlanResult<Plan> {
        let encoded: EncodedPlan = bincode::deserialize(data)?;
        PlanBuilder::new(Arc::new(encoded.schema))
            .config(config)
            .build(encoded.node, encoded.target_entries)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> PlanResult<()> {
        fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>, config: AnalyzerConfig) -> PlanResult<Plan> {
        let data = fs::read(path)?;
        Self::decode(&data, config)
    }
}
