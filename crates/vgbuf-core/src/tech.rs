use crate::geometry::{wire_capacitance, wire_delay};

/// Process-wide technology parameters: a single buffer model plus
/// per-unit-length wire resistance/capacitance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Technology {
    /// Buffer intrinsic delay.
    pub d_intr: f64,
    /// Buffer input capacitance.
    pub c_buf: f64,
    /// Buffer driver resistance.
    pub r_buf: f64,
    /// Per-unit-length wire resistance.
    pub unit_r: f64,
    /// Per-unit-length wire capacitance.
    pub unit_c: f64,
}

impl Technology {
    /// Capacitance contributed by a wire of the given length.
    pub fn edge_capacitance(&self, length: f64) -> f64 {
        wire_capacitance(self.unit_c, length)
    }

    /// Elmore delay of a wire of the given length driving `c_load`.
    pub fn edge_delay(&self, length: f64, c_load: f64) -> f64 {
        wire_delay(self.unit_r, self.unit_c, length, c_load)
    }

    /// Delay of the buffer when loaded by `c_load`.
    pub fn buffer_delay(&self, c_load: f64) -> f64 {
        self.d_intr + self.r_buf * c_load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech() -> Technology {
        Technology {
            d_intr: 0.0,
            c_buf: 1.0,
            r_buf: 1.0,
            unit_r: 1.0,
            unit_c: 1.0,
        }
    }

    #[test]
    fn buffer_delay_is_intrinsic_plus_resistance_times_load() {
        let t = tech();
        assert_eq!(t.buffer_delay(2.0), 2.0);
    }

    #[test]
    fn edge_capacitance_scales_with_length() {
        let t = tech();
        assert_eq!(t.edge_capacitance(3.0), 3.0);
    }
}
