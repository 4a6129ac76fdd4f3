//! Plan nodes: what a query does with its (optional) predicate.

use crate::error::PlanResult;
use crate::expression::{Expr, ExtractInfoVisitor};
use crate::plan::{AnalyzerConfig, Eligibility, ExtractedPlanInfo};
use crate::schema::FieldId;
use serde::{Deserialize, Serialize};

/// Distance metric used by a vector search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    L2,
    InnerProduct,
    Cosine,
    Hamming,
    Jaccard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInfo {
    pub topk: usize,
    pub metric_type: MetricType,
    /// Digits kept in returned distances; `None` keeps full precision
    pub round_decimal: Option<u32>,
}

/// Similarity search over a vector field, optionally filtered by a predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPlanNode {
    pub field_id: FieldId,
    pub search_info: SearchInfo,
    pub predicate: Option<Expr>,
}

/// Plain retrieval of the rows matching a predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievePlanNode {
    pub predicate: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanNode {
    VectorSearch(VectorPlanNode),
    Retrieve(RetrievePlanNode),
}

impl PlanNode {
    pub fn predicate(&self) -> Option<&Expr> {
        match self {
            PlanNode::VectorSearch(node) => node.predicate.as_ref(),
            PlanNode::Retrieve(node) => node.predicate.as_ref(),
        }
    }

    /// Summarize the fields this node reads.
    ///
    /// A vector search always reads its vector field, which the vector index
    /// serves; the predicate contributes whatever the expression extractor finds.
    pub fn extract_info(&self, config: &AnalyzerConfig) -> PlanResult<ExtractedPlanInfo> {
        let mut plan_info = ExtractedPlanInfo::new();
        if let PlanNode::VectorSearch(node) = self {
            plan_info.add_involved_field(node.field_id, Eligibility::Indexable);
        }
        if let Some(predicate) = self.predicate() {
            ExtractInfoVisitor::with_config(&mut plan_info, config).extract(predicate)?;
        }
        Ok(plan_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::OpType;

    fn search(predicate: Option<Expr>) -> PlanNode {
        PlanNode::VectorSearch(VectorPlanNode {
            field_id: FieldId(102),
            search_info: SearchInfo {
                topk: 10,
                metric_type: MetricType::L2,
                round_decimal: None,
            },
            predicate,
        })
    }

    #[test]
    fn test_search_without_predicate() {
        let info = search(None).extract_info(&AnalyzerConfig::default()).unwrap();

        assert_eq!(info.involved_fields().collect::<Vec<_>>(), vec![FieldId(102)]);
        assert!(info.is_index_eligible(FieldId(102)));
    }

    #[test]
    fn test_search_with_predicate() {
        let predicate = Expr::compare(FieldId(100), OpType::LessThan, FieldId(101));
        let info = search(Some(predicate))
            .extract_info(&AnalyzerConfig::default())
            .unwrap();

        assert_eq!(
            info.involved_fields().collect::<Vec<_>>(),
            vec![FieldId(100), FieldId(101), FieldId(102)]
        );
        assert!(info.has_cross_field_compare());
        assert!(info.is_index_eligible(FieldId(102)));
    }

    #[test]
    fn test_retrieve() {
        let empty = PlanNode::Retrieve(RetrievePlanNode { predicate: None });
        assert!(empty
            .extract_info(&AnalyzerConfig::default())
            .unwrap()
            .is_empty());

        let node = PlanNode::Retrieve(RetrievePlanNode {
            predicate: Some(Expr::term(FieldId(100), [1i64, 2, 3])),
        });
        let info = node.extract_info(&AnalyzerConfig::default()).unwrap();
        assert_eq!(info.involved_fields().collect::<Vec<_>>(), vec![FieldId(100)]);
        assert!(info.is_index_servable());
    }
}
