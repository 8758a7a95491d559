//! The render-side collaborator and a headless implementation of it.

use serde::Serialize;

use crate::catalog::ResourceRef;
use crate::color::HexColor;
use crate::loader::Resource;

/// Opaque handle to a bindable surface owned by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SurfaceHandle(u32);

impl SurfaceHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

/// The scene owner. Writes mark the surface dirty; the viewer's own render
/// loop picks them up on its next frame.
pub trait Viewer {
    /// Look up the surface whose mesh name contains `key`.
    fn surface(&mut self, key: &str) -> Option<SurfaceHandle>;

    fn set_surface_resource(&mut self, target: SurfaceHandle, resource: &Resource);

    fn set_surface_color(&mut self, target: SurfaceHandle, color: HexColor);
}

/// Mesh names of the kitchen model.
pub const KITCHEN_MESHES: [&str; 7] = [
    "Kitchen_Utensils",
    "Kitchen_Cupboards",
    "Kitchen_Backsplash",
    "Kitchen_Stools",
    "Kitchen_Worktop",
    "Kitchen_Floor",
    "Kitchen_Walls",
];

/// What is currently shown on one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceState {
    pub mesh: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    /// Writes since the scene was created.
    pub revision: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerWrite {
    Resource(SurfaceHandle, ResourceRef),
    Color(SurfaceHandle, HexColor),
}

/// A viewer without a GPU: it keeps the bound state of every surface and a
/// log of writes. Used by the command-line harness and by tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewer {
    surfaces: Vec<SurfaceState>,
    writes: Vec<ViewerWrite>,
}

impl HeadlessViewer {
    pub fn new<I, S>(meshes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surfaces = meshes
            .into_iter()
            .map(|mesh| SurfaceState {
                mesh: mesh.into(),
                resource: None,
                color: None,
                revision: 0,
            })
            .collect();
        Self {
            surfaces,
            writes: Vec::new(),
        }
    }

    pub fn kitchen() -> Self {
        Self::new(KITCHEN_MESHES)
    }

    pub fn surfaces(&self) -> &[SurfaceState] {
        &self.surfaces
    }

    pub fn state(&self, target: SurfaceHandle) -> Option<&SurfaceState> {
        self.surfaces.get(target.0 as usize)
    }

    pub fn state_by_mesh(&self, mesh: &str) -> Option<&SurfaceState> {
        self.surfaces.iter().find(|surface| surface.mesh == mesh)
    }

    pub fn writes(&self) -> &[ViewerWrite] {
        &self.writes
    }
}

impl Viewer for HeadlessViewer {
    fn surface(&mut self, key: &str) -> Option<SurfaceHandle> {
        self.surfaces
            .iter()
            .position(|surface| surface.mesh.contains(key))
            .and_then(|index| u32::try_from(index).ok())
            .map(SurfaceHandle)
    }

    fn set_surface_resource(&mut self, target: SurfaceHandle, resource: &Resource) {
        let Some(surface) = self.surfaces.get_mut(target.0 as usize) else {
            log::warn!("write to unknown surface {}", target.0);
            return;
        };
        log::info!(
            "{}: texture {} ({} bytes)",
            surface.mesh,
            resource.reference,
            resource.bytes.len()
        );
        surface.resource = Some(resource.reference.clone());
        surface.revision += 1;
        self.writes
            .push(ViewerWrite::Resource(target, resource.reference.clone()));
    }

    fn set_surface_color(&mut self, target: SurfaceHandle, color: HexColor) {
        let Some(surface) = self.surfaces.get_mut(target.0 as usize) else {
            log::warn!("write to unknown surface {}", target.0);
            return;
        };
        log::info!("{}: colour {}", surface.mesh, color);
        surface.color = Some(color);
        surface.revision += 1;
        self.writes.push(ViewerWrite::Color(target, color));
    }
}
