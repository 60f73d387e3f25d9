use panelview_common::{ObjectId, PickCamera, Ray};
use panelview_kernel::ObjectRegistry;

use crate::pointer::PointerState;

/// One ray/object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: ObjectId,
    pub distance: f32,
    pub hover_allowed: bool,
}

/// Every object the ray passes through, nearest first.
///
/// Visibility is not a filter: hidden objects that allow hover are still
/// pickable, which is how hidden junctions get revealed.
pub fn intersect_all(ray: &Ray, registry: &ObjectRegistry) -> Vec<Hit> {
    let mut hits: Vec<Hit> = registry
        .iter()
        .filter_map(|object| {
            ray.intersect_box(&object.transform, object.half_extents)
                .map(|distance| Hit {
                    id: object.id,
                    distance,
                    hover_allowed: object.hover_allowed,
                })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// First hit in occlusion order whose object allows hover. Nearer
/// disallowed hits are skipped rather than blocking.
pub fn first_allowed(hits: &[Hit]) -> Option<ObjectId> {
    hits.iter().find(|h| h.hover_allowed).map(|h| h.id)
}

/// Resolve the object under the pointer.
///
/// Returns `None` without casting when the pointer is off the surface or a
/// camera gesture holds it.
pub fn pick<C: PickCamera + ?Sized>(
    pointer: &PointerState,
    camera: &C,
    registry: &ObjectRegistry,
) -> Option<ObjectId> {
    if !pointer.active() {
        return None;
    }
    let ndc = pointer.ndc()?;
    let Some(ray) = camera.ray_through(ndc) else {
        tracing::trace!(?ndc, "degenerate pick ray");
        return None;
    };
    let hits = intersect_all(&ray, registry);
    let picked = first_allowed(&hits);
    tracing::trace!(hits = hits.len(), ?picked, "pointer pick");
    picked
}
