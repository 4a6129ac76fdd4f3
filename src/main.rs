//! vibeplan - inspect the static metadata of predicate plans

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use vibeplan::access::DataType;
use vibeplan::expression::{ArithOpType, Expr, OpType};
use vibeplan::plan::{
    AnalyzerConfig, ExtractedPlanInfo, MetricType, Plan, PlanBuilder, PlanNode, RetrievePlanNode,
    SearchInfo, VectorPlanNode,
};
use vibeplan::schema::{FieldId, Schema};

/// vibeplan - predicate plan analyzer
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Reject predicates deeper than this many nodes
    #[arg(short = 'm', long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a plan file and print its extracted info
    Inspect {
        /// Plan file written by `Plan::write_to`
        path: PathBuf,
    },
    /// Analyze a set of sample predicates against a demo schema
    Demo,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = AnalyzerConfig {
        max_depth: args.max_depth,
    };

    match args.command {
        Command::Inspect { path } => {
            let plan = Plan::read_from(&path, config)
                .with_context(|| format!("Failed to load plan from {}", path.display()))?;
            print_plan(&plan);
        }
        Command::Demo => run_demo(config)?,
    }

    Ok(())
}

fn print_plan(plan: &Plan) {
    match plan.node() {
        PlanNode::VectorSearch(search) => println!(
            "Vector search on ${} (topk={}, metric={:?})",
            search.field_id, search.search_info.topk, search.search_info.metric_type
        ),
        PlanNode::Retrieve(_) => println!("Retrieve"),
    }
    match plan.node().predicate() {
        Some(predicate) => println!("Predicate: {}", predicate),
        None => println!("Predicate: <none>"),
    }
    print_info(plan.schema(), &plan.extracted_info());

    let load: Vec<String> = plan
        .fields_to_load()
        .iter()
        .map(|id| field_name(plan.schema(), *id))
        .collect();
    println!("Load:      {}", load.join(", "));
}

fn print_info(schema: &Schema, info: &ExtractedPlanInfo) {
    for field_id in info.involved_fields() {
        if let Some(eligibility) = info.eligibility(field_id) {
            println!("  {:<12} {:?}", field_name(schema, field_id), eligibility);
        }
    }
    println!("  cross-field compare: {}", info.has_cross_field_compare());
    println!("  index servable:      {}", info.is_index_servable());
}

fn field_name(schema: &Schema, field_id: FieldId) -> String {
    schema
        .get(field_id)
        .map(|meta| meta.name.clone())
        .unwrap_or_else(|| format!("${}", field_id))
}

fn run_demo(config: AnalyzerConfig) -> Result<()> {
    let mut schema = Schema::new();
    let id = schema.add_primary_key("id", DataType::Int64);
    let age = schema.add_field("age", DataType::Int32);
    let score = schema.add_field("score", DataType::Double);
    let tag = schema.add_field("tag", DataType::VarChar);
    let embedding = schema.add_field("embedding", DataType::FloatVector { dim: 128 });
    let builder = PlanBuilder::new(Arc::new(schema)).config(config);

    let predicates = vec![
        Expr::term(id, [1i64, 2]),
        Expr::and(
            Expr::unary_range(age, OpType::LessThan, 10i64),
            Expr::arith_range(age, ArithOpType::Mod, 2i64, OpType::Equal, 0i64),
        ),
        Expr::compare(age, OpType::Equal, score),
        Expr::not(Expr::term(tag, ["a"])),
        Expr::or(
            Expr::compare(age, OpType::GreaterThan, score),
            Expr::term(age, [5i64]),
        ),
    ];

    for predicate in predicates {
        let search = builder
            .build(
                PlanNode::VectorSearch(VectorPlanNode {
                    field_id: embedding,
                    search_info: SearchInfo {
                        topk: 10,
                        metric_type: MetricType::L2,
                        round_decimal: None,
                    },
                    predicate: Some(predicate.clone()),
                }),
                vec![id],
            )
            .context("Failed to build demo search plan")?;
        let retrieve = builder
            .build(
                PlanNode::Retrieve(RetrievePlanNode {
                    predicate: Some(predicate.clone()),
                }),
                vec![],
            )
            .context("Failed to build demo retrieve plan")?;

        println!("Predicate: {}", predicate);
        println!(" retrieve:");
        print_info(search.schema(), &retrieve.extracted_info());
        println!(" search:");
        print_info(search.schema(), &search.extracted_info());
        println!();
    }

    Ok(())
}
