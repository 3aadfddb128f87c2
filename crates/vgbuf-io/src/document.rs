use serde::{Deserialize, Serialize};

/// Deserialized shape of a technology (buffer + wire parameter) file.
#[derive(Debug, Deserialize)]
pub struct TechnologyDocument {
    pub module: Vec<ModuleEntry>,
    pub technology: TechnologyParams,
}

#[derive(Debug, Deserialize)]
pub struct ModuleEntry {
    pub input: Vec<BufferParams>,
}

#[derive(Debug, Deserialize)]
pub struct BufferParams {
    pub intrinsic_delay: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "R")]
    pub r: f64,
}

#[derive(Debug, Deserialize)]
pub struct TechnologyParams {
    pub unit_wire_resistance: f64,
    pub unit_wire_capacitance: f64,
}

/// Deserialized shape of a routed trace-tree file.
#[derive(Debug, Deserialize)]
pub struct TraceTreeDocument {
    pub node: Vec<NodeDocument>,
    pub edge: Vec<EdgeDocument>,
}

#[derive(Debug, Deserialize)]
pub struct NodeDocument {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub capacitance: Option<f64>,
    pub rat: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct EdgeDocument {
    pub id: u32,
    pub vertices: [u32; 2],
    pub segments: Vec<[i32; 2]>,
}

/// Serialized shape of the resulting buffered tree.
#[derive(Debug, Serialize)]
pub struct OutputDocument {
    pub node: Vec<OutputNodeDocument>,
    pub edge: Vec<OutputEdgeDocument>,
    #[serde(rename = "C", skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(rename = "Q", skip_serializing_if = "Option::is_none")]
    pub q: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OutputNodeDocument {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacitance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
pub struct OutputEdgeDocument {
    pub id: u32,
    pub vertices: [u32; 2],
    pub segments: Vec<[i32; 2]>,
}
