use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::section::Section;
use super::station::Station;
use super::wire::NetworkConfig;

/// Stations (nodes) and sections (edges) of one topology load.
///
/// Built wholesale from a [`NetworkConfig`] and never patched; a refresh replaces
/// the whole value. Every edge's endpoints are guaranteed to be nodes of the graph.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub graph: DiGraph<Station, Section>,
    station_id_to_index: HashMap<String, NodeIndex>,
    section_id_to_index: HashMap<String, EdgeIndex>,
}

impl Topology {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a topology payload, assigning display coordinates by station order.
    ///
    /// Duplicate station or section ids keep their first occurrence. Sections whose
    /// endpoints are not in the station list are dropped.
    #[must_use]
    pub fn from_config(config: &NetworkConfig, coordinates: &[(f64, f64)], fallback: (f64, f64)) -> Self {
        let mut topology = Self::new();

        for (order, station_id) in config.stations.iter().enumerate() {
            if topology.station_id_to_index.contains_key(station_id) {
                crate::log!("Skipping duplicate station {}", station_id);
                continue;
            }
            topology.add_station(Station::from_ordered_id(station_id, order, coordinates, fallback));
        }

        for record in &config.sections {
            let section = Section::from(record.clone());
            if topology.add_section(section).is_none() {
                crate::log!("Skipping section {} with unknown or duplicate reference", record.id);
            }
        }

        topology
    }

    pub fn add_station(&mut self, station: Station) -> NodeIndex {
        if let Some(&index) = self.station_id_to_index.get(&station.id) {
            return index;
        }
        let id = station.id.clone();
        let index = self.graph.add_node(station);
        self.station_id_to_index.insert(id, index);
        index
    }

    /// Returns `None` when an endpoint is unknown or the id is already taken
    pub fn add_section(&mut self, section: Section) -> Option<EdgeIndex> {
        if self.section_id_to_index.contains_key(&section.id) {
            return None;
        }
        let from = *self.station_id_to_index.get(&section.start)?;
        let to = *self.station_id_to_index.get(&section.end)?;
        let id = section.id.clone();
        let index = self.graph.add_edge(from, to, section);
        self.section_id_to_index.insert(id, index);
        Some(index)
    }

    #[must_use]
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.station_id_to_index
            .get(id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.section_id_to_index
            .get(id)
            .and_then(|&index| self.graph.edge_weight(index))
    }

    /// Section with its resolved start and end stations
    #[must_use]
    pub fn section_endpoints(&self, id: &str) -> Option<(&Section, &Station, &Station)> {
        let &index = self.section_id_to_index.get(id)?;
        let (from, to) = self.graph.edge_endpoints(index)?;
        Some((
            self.graph.edge_weight(index)?,
            self.graph.node_weight(from)?,
            self.graph.node_weight(to)?,
        ))
    }

    /// Stations in payload order
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    /// Sections in payload order, each with its start and end station
    pub fn sections(&self) -> impl Iterator<Item = (&Section, &Station, &Station)> {
        self.graph.edge_references().map(|edge| {
            (
                edge.weight(),
                &self.graph[edge.source()],
                &self.graph[edge.target()],
            )
        })
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// A topology with no stations or no sections has nothing meaningful to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.station_count() == 0 || self.section_count() == 0
    }
}
