use std::path::PathBuf;

use anyhow::Context as _;
use olplot_analysis::world::{Trajectory, World};

use crate::render::{ChartStyle, trajectory_chart};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrajectoryArg {
    /// World description (JSON)
    pub(super) world: PathBuf,
    /// Trajectory CSV with `x` and `y` columns
    pub(super) trajectory: PathBuf,
    /// Output SVG file [default: the trajectory path with an `.svg` extension]
    #[arg(long)]
    pub(super) svg: Option<PathBuf>,
}

impl TrajectoryArg {
    fn svg_path(&self) -> PathBuf {
        self.svg
            .clone()
            .unwrap_or_else(|| self.trajectory.with_extension("svg"))
    }
}

pub(crate) fn run(arg: &TrajectoryArg) -> anyhow::Result<()> {
    let world = World::load(&arg.world)
        .with_context(|| format!("Failed to load world {}", arg.world.display()))?;
    let trajectory = Trajectory::load(&arg.trajectory)
        .with_context(|| format!("Failed to load trajectory {}", arg.trajectory.display()))?;

    println!(
        "{}: {} steps in a {}x{} world",
        arg.trajectory.display(),
        trajectory.points().len(),
        world.config.xsize,
        world.config.ysize
    );

    trajectory_chart::render(&arg.svg_path(), &world, &trajectory, &ChartStyle::default())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_svg_path() {
        let arg = TrajectoryArg {
            world: PathBuf::from("world.json"),
            trajectory: PathBuf::from("runs/trajectory.csv"),
            svg: None,
        };
        assert_eq!(arg.svg_path(), PathBuf::from("runs/trajectory.svg"));
    }

    #[test]
    fn test_run_heatmap_world() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rfield0.csv"), "x,y\n0.2,0.2\n0.3,0.3\n0.4,0.4\n").unwrap();
        let world = dir.path().join("world.json");
        fs::write(
            &world,
            r#"{
                "xsize": 1.0,
                "ysize": 1.0,
                "start": { "x": 0.1, "y": 0.1 },
                "rectangles": [{ "x": 0.5, "y": 0.5, "w": 0.2, "h": 0.1 }],
                "circles": [{ "x": 0.7, "y": 0.3, "r": 0.05 }],
                "reward_model": {
                    "kind": "heatmap",
                    "fields": [{ "path": "rfield0.csv", "sigma": 0.02, "magnitude": 1.0 }]
                }
            }"#,
        )
        .unwrap();
        let trajectory = dir.path().join("trajectory.csv");
        fs::write(&trajectory, "x,y\n0.1,0.1\n0.15,0.2\n0.2,0.35\n").unwrap();

        let arg = TrajectoryArg {
            world,
            trajectory,
            svg: None,
        };
        run(&arg).unwrap();
        assert!(fs::read_to_string(arg.svg_path()).unwrap().contains("<svg"));
    }
}
