//! State of the Steiner comparison widget.

use crate::config::SteinerParameters;
use crate::physics::steiner::{ConnectionMode, SteinerLayout, SteinerLengthModel};

#[derive(Debug, Clone, Default)]
pub struct SteinerWidget {
    model: SteinerLengthModel,
    mode: ConnectionMode,
}

impl SteinerWidget {
    pub fn new(parameters: &SteinerParameters) -> Self {
        Self {
            model: SteinerLengthModel::from_parameters(parameters),
            mode: ConnectionMode::default(),
        }
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ConnectionMode) {
        if mode != self.mode {
            log::debug!("Steiner mode: {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ConnectionMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn layout(&self) -> SteinerLayout {
        self.model.compute(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_diagonals() {
        let widget = SteinerWidget::default();
        assert_eq!(widget.mode(), ConnectionMode::Direct);
        assert_eq!(widget.layout().segments().len(), 2);
    }

    #[test]
    fn test_toggle_switches_layout() {
        let mut widget = SteinerWidget::default();
        assert_eq!(widget.toggle_mode(), ConnectionMode::SoapFilm);

        let layout = widget.layout();
        assert_eq!(layout.mode, ConnectionMode::SoapFilm);
        assert!(layout.active_length() < layout.direct_length);

        assert_eq!(widget.toggle_mode(), ConnectionMode::Direct);
    }

    #[test]
    fn test_side_scales_lengths() {
        let widget = SteinerWidget::new(&SteinerParameters { side: 2.0 });
        let layout = widget.layout();
        assert!((layout.direct_length - 4.0 * 2.0_f64.sqrt()).abs() < 1e-9);
    }
}
