//! Camera navigation gate shared by the orbit camera and the gizmo

use bevy::prelude::*;

/// Whether the orbit camera reacts to pointer input
///
/// The gizmo suspends navigation while a drag is in progress so the same
/// pointer motion does not also orbit the view.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CameraNavigation {
    enabled: bool,
}

impl Default for CameraNavigation {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CameraNavigation {
    pub fn suspend(&mut self) {
        if self.enabled {
            debug!("[NAV] Camera navigation suspended");
        }
        self.enabled = false;
    }

    pub fn resume(&mut self) {
        if !self.enabled {
            debug!("[NAV] Camera navigation resumed");
        }
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
