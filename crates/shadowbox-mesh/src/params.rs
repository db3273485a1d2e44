use thiserror::Error;

pub const DEFAULT_RESOLUTION: u32 = 1000;
pub const DEFAULT_WALL_THICKNESS: u32 = 10;

/// Integer geometry of one voxel: edge length and wall inset, in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshParams {
    pub resolution: u32,
    pub wall_thickness: u32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            wall_thickness: DEFAULT_WALL_THICKNESS,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("resolution must be positive")]
    ZeroResolution,
    #[error("wall thickness must be positive")]
    ZeroWallThickness,
    #[error("wall thickness {wall_thickness} leaves no cavity in a voxel of resolution {resolution}")]
    WallTooThick { resolution: u32, wall_thickness: u32 },
}

impl MeshParams {
    pub const fn new(resolution: u32, wall_thickness: u32) -> Self {
        Self {
            resolution,
            wall_thickness,
        }
    }

    /// Both insets of a voxel must fit inside it with room to spare.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.resolution == 0 {
            return Err(ParamsError::ZeroResolution);
        }
        if self.wall_thickness == 0 {
            return Err(ParamsError::ZeroWallThickness);
        }
        if 2 * u64::from(self.wall_thickness) >= u64::from(self.resolution) {
            return Err(ParamsError::WallTooThick {
                resolution: self.resolution,
                wall_thickness: self.wall_thickness,
            });
        }
        Ok(())
    }
}
