//! Declarative dependency graph over the derived metrics.
//!
//! The recalculation order is data, not call-site convention. Metrics are
//! nodes and "must be recomputed after" relations are edges; an update pass
//! traverses the dirty subgraph in topological order. Adding a metric means
//! adding a node and its edges, not re-threading a chain of calls.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use std::collections::{HashMap, HashSet};

/// Derived metrics, one node each in the recalculation graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Multiplier,
    ManualActionsSaved,
    OperationalValue,
    ClicksDriven,
    MarketingValue,
    ConversionsDriven,
    ConversionValue,
    TotalValue,
    Roi,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::Multiplier,
        Metric::ManualActionsSaved,
        Metric::OperationalValue,
        Metric::ClicksDriven,
        Metric::MarketingValue,
        Metric::ConversionsDriven,
        Metric::ConversionValue,
        Metric::TotalValue,
        Metric::Roi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Multiplier => "multiplier",
            Metric::ManualActionsSaved => "manual_actions_saved",
            Metric::OperationalValue => "operational_value",
            Metric::ClicksDriven => "clicks_driven",
            Metric::MarketingValue => "marketing_value",
            Metric::ConversionsDriven => "conversions_driven",
            Metric::ConversionValue => "conversion_value",
            Metric::TotalValue => "total_value",
            Metric::Roi => "roi",
        }
    }
}

/// Metric -> metrics that read it and must follow it in an update pass.
const EDGES: [(Metric, Metric); 8] = [
    (Metric::Multiplier, Metric::ManualActionsSaved),
    (Metric::ManualActionsSaved, Metric::OperationalValue),
    (Metric::ClicksDriven, Metric::MarketingValue),
    (Metric::ConversionsDriven, Metric::ConversionValue),
    (Metric::OperationalValue, Metric::TotalValue),
    (Metric::MarketingValue, Metric::TotalValue),
    (Metric::ConversionValue, Metric::TotalValue),
    (Metric::TotalValue, Metric::Roi),
];

/// The fixed recalculation DAG.
pub struct MetricGraph {
    graph: DiGraph<Metric, ()>,
    nodes: HashMap<Metric, NodeIndex>,
    topo_order: Vec<Metric>,
}

impl MetricGraph {
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for metric in Metric::ALL {
            nodes.insert(metric, graph.add_node(metric));
        }
        for (from, to) in EDGES {
            graph.add_edge(nodes[&from], nodes[&to], ());
        }
        let topo_order = toposort(&graph, None)
            .expect("metric dependency graph is acyclic")
            .into_iter()
            .map(|ix| graph[ix])
            .collect();
        Self {
            graph,
            nodes,
            topo_order,
        }
    }

    /// All metrics that must be recomputed, in evaluation order, when the
    /// given seed metrics are invalidated. Seeds are included.
    pub fn affected(&self, seeds: &[Metric]) -> Vec<Metric> {
        let mut dirty: HashSet<Metric> = HashSet::new();
        for seed in seeds {
            let mut bfs = Bfs::new(&self.graph, self.nodes[seed]);
            while let Some(ix) = bfs.next(&self.graph) {
                dirty.insert(self.graph[ix]);
            }
        }
        self.topo_order
            .iter()
            .copied()
            .filter(|metric| dirty.contains(metric))
            .collect()
    }
}

impl Default for MetricGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[Metric], metric: Metric) -> usize {
        order
            .iter()
            .position(|m| *m == metric)
            .unwrap_or_else(|| panic!("{} missing from order", metric.name()))
    }

    #[test]
    fn multiplier_invalidates_the_operational_chain() {
        let graph = MetricGraph::new();
        let affected = graph.affected(&[Metric::Multiplier]);
        let expected: HashSet<Metric> = [
            Metric::Multiplier,
            Metric::ManualActionsSaved,
            Metric::OperationalValue,
            Metric::TotalValue,
            Metric::Roi,
        ]
        .into_iter()
        .collect();
        assert_eq!(affected.iter().copied().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn affected_metrics_come_back_in_dependency_order() {
        let graph = MetricGraph::new();
        let affected = graph.affected(&[Metric::Multiplier, Metric::ConversionsDriven]);
        assert!(
            position(&affected, Metric::Multiplier)
                < position(&affected, Metric::ManualActionsSaved)
        );
        assert!(
            position(&affected, Metric::ManualActionsSaved)
                < position(&affected, Metric::OperationalValue)
        );
        assert!(
            position(&affected, Metric::ConversionsDriven)
                < position(&affected, Metric::ConversionValue)
        );
        assert!(
            position(&affected, Metric::ConversionValue) < position(&affected, Metric::TotalValue)
        );
        assert!(position(&affected, Metric::TotalValue) < position(&affected, Metric::Roi));
    }

    #[test]
    fn leaf_seed_only_touches_itself() {
        let graph = MetricGraph::new();
        assert_eq!(graph.affected(&[Metric::Roi]), vec![Metric::Roi]);
    }

    #[test]
    fn vendor_cost_style_seed_skips_value_metrics() {
        let graph = MetricGraph::new();
        let affected = graph.affected(&[Metric::Roi]);
        assert!(!affected.contains(&Metric::TotalValue));
        assert!(!affected.contains(&Metric::OperationalValue));
    }

    #[test]
    fn empty_seed_recomputes_nothing() {
        let graph = MetricGraph::new();
        assert!(graph.affected(&[]).is_empty());
    }
}
