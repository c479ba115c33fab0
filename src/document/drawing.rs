use crate::foundation::error::{WobbleError, WobbleResult};

/// The rendered shapes a wobbler drives.
///
/// Shapes are addressed by index, in document order. Only the geometry text is touched.
pub trait Drawing {
    /// Number of path shapes.
    fn shape_count(&self) -> usize;
    /// Current geometry description of a shape.
    fn geometry(&self, index: usize) -> Option<&str>;
    /// Replace the displayed geometry of a shape.
    fn set_geometry(&mut self, index: usize, d: &str) -> WobbleResult<()>;

    /// All geometry descriptions, in order.
    fn geometries(&self) -> Vec<String> {
        (0..self.shape_count())
            .filter_map(|i| self.geometry(i).map(str::to_string))
            .collect()
    }
}

/// Plain list of geometry strings, with a write counter per shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryDrawing {
    shapes: Vec<String>,
    writes: Vec<u64>,
}

impl InMemoryDrawing {
    /// Create a drawing from geometry descriptions.
    pub fn new<I, S>(shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let shapes: Vec<String> = shapes.into_iter().map(Into::into).collect();
        let writes = vec![0; shapes.len()];
        Self { shapes, writes }
    }

    /// How many times a shape has been rewritten.
    pub fn writes(&self, index: usize) -> u64 {
        self.writes.get(index).copied().unwrap_or(0)
    }
}

impl Drawing for InMemoryDrawing {
    fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn geometry(&self, index: usize) -> Option<&str> {
        self.shapes.get(index).map(String::as_str)
    }

    fn set_geometry(&mut self, index: usize, d: &str) -> WobbleResult<()> {
        let slot = self
            .shapes
            .get_mut(index)
            .ok_or_else(|| WobbleError::document(format!("no shape at index {index}")))?;
        d.clone_into(slot);
        self.writes[index] += 1;
        Ok(())
    }
}
