use glam::Mat4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strand {
    pub points: Vec<[f32; 3]>,
}

impl Strand {
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self { points }
    }

    pub fn transform(&mut self, matrix: Mat4) {
        for point in &mut self.points {
            let v = matrix.transform_point3((*point).into());
            *point = v.to_array();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HairSystem {
    #[serde(default)]
    pub name: String,
    pub strands: Vec<Strand>,
}

impl HairSystem {
    pub fn new(name: impl Into<String>, strands: Vec<Strand>) -> Self {
        Self {
            name: name.into(),
            strands,
        }
    }

    pub fn point_count(&self) -> usize {
        self.strands.iter().map(|strand| strand.points.len()).sum()
    }

    pub fn transform(&mut self, matrix: Mat4) {
        for strand in &mut self.strands {
            strand.transform(matrix);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleSystem {
    Hair(HairSystem),
    Emitter {
        name: String,
        #[serde(default)]
        particle_count: usize,
    },
}

impl ParticleSystem {
    pub fn name(&self) -> &str {
        match self {
            ParticleSystem::Hair(system) => &system.name,
            ParticleSystem::Emitter { name, .. } => name,
        }
    }

    pub fn as_hair(&self) -> Option<&HairSystem> {
        match self {
            ParticleSystem::Hair(system) => Some(system),
            ParticleSystem::Emitter { .. } => None,
        }
    }
}
