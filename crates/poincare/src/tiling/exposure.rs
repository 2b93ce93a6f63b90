//! Exposure parameter table for {p, q} tilings, after the case analysis in
//! Ajit Datar, "Generating hyperbolic patterns for regular and non-regular
//! p-gons", section 3.1.2.
//!
//! A vertex's exposure is the number of polygons already meeting at it when a
//! layer is generated; the table answers how many vertices and polygons the
//! generation pass skips or produces for each case. The branches for p = 3
//! and q = 3 are special-cased, everything else uses the general formulas.

use super::TilingError;

/// Exposure of a frontier vertex: minimally or maximally covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exposure {
    Min,
    Max,
}

/// Closed-form per-{p, q} lookup. Valid only for hyperbolic pairs.
#[derive(Clone, Copy, Debug)]
pub struct ExposureParameterTable {
    p: u32,
    q: u32,
}

impl ExposureParameterTable {
    /// Rejects pairs that do not describe a hyperbolic tiling:
    /// requires p >= 3, q >= 3 and (p - 2)(q - 2) > 4.
    pub fn new(p: u32, q: u32) -> Result<Self, TilingError> {
        if p < 3 || q < 3 || (p - 2) * (q - 2) <= 4 {
            return Err(TilingError::UnsupportedTiling { p, q });
        }
        Ok(Self { p, q })
    }

    /// Number of polygons meeting at a vertex with the given exposure.
    pub fn polygons_meeting(&self, exposure: Exposure) -> u32 {
        match exposure {
            Exposure::Min => 1,
            Exposure::Max => self.q - 1,
        }
    }

    /// Exposure of the vertex at `vertex_index` of polygon `pgon_index` in
    /// the given layer.
    pub fn exposure(&self, layer: usize, vertex_index: usize, pgon_index: usize) -> Exposure {
        if layer == 0 {
            if self.p == 3 {
                return if pgon_index == 0 {
                    Exposure::Min
                } else {
                    Exposure::Max
                };
            }
            if self.q == 3 {
                return Exposure::Max;
            }
        }
        if self.q == 3 {
            if vertex_index == 0 {
                Exposure::Min
            } else {
                Exposure::Max
            }
        } else if pgon_index == 0 {
            Exposure::Min
        } else {
            Exposure::Max
        }
    }

    pub fn vertices_to_skip(&self, exposure: Exposure) -> u32 {
        if self.q == 3 {
            return match exposure {
                Exposure::Min => 3,
                Exposure::Max => 2,
            };
        }
        if self.p == 3 {
            return 1;
        }
        match exposure {
            Exposure::Min => 1,
            Exposure::Max => 0,
        }
    }

    /// May be -1: the first polygon slot of the previous vertex is reused.
    pub fn polygons_to_skip(&self, exposure: Exposure, vertex_index: usize) -> i32 {
        if self.q == 3 {
            return 0;
        }
        if self.p == 3 {
            return match exposure {
                Exposure::Min => -1,
                Exposure::Max => 0,
            };
        }
        if vertex_index == 0 {
            -1
        } else {
            0
        }
    }

    pub fn vertices_to_visit(&self, exposure: Exposure) -> u32 {
        if self.p == 3 {
            return 1;
        }
        if self.q == 3 {
            return match exposure {
                Exposure::Min => self.p - 5,
                Exposure::Max => self.p - 4,
            };
        }
        match exposure {
            Exposure::Min => self.p - 3,
            Exposure::Max => self.p - 2,
        }
    }

    /// Defined only for the p = 3 and q = 3 special cases; the general case
    /// is covered by the per-vertex visit counts instead.
    pub fn polygons_to_generate(
        &self,
        exposure: Exposure,
        _vertex_index: usize,
    ) -> Result<u32, TilingError> {
        if self.q == 3 {
            return Ok(1);
        }
        if self.p == 3 {
            return Ok(match exposure {
                Exposure::Min => self.q - 4,
                Exposure::Max => self.q - 3,
            });
        }
        Err(TilingError::UnsupportedTiling {
            p: self.p,
            q: self.q,
        })
    }
}
