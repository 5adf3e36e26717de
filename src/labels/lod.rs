//! Zoom-dependent admission of tile labels.

/// Upper bound of the discard threshold.
pub const MAX_LOD: i32 = 6;

/// Discard threshold for the current zoom, capped at `MAX_LOD`.
pub fn lod_discard(max_zoom: f32, zoom: f32) -> i32 {
    lod_discard_capped(max_zoom, zoom, MAX_LOD)
}

/// How many zoom levels below `zoom` a tile may sit and still contribute
/// labels. Falls off logarithmically as `zoom` approaches `max_zoom`.
pub fn lod_discard_capped(max_zoom: f32, zoom: f32, max_lod: i32) -> i32 {
    let max_zoom = max_zoom.max(0.0);
    let zoom = zoom.clamp(0.0, max_zoom);
    let base = max_zoom + 2.0;
    let falloff = (base - zoom).ln() / base.ln() * max_zoom * 0.5;
    (falloff.floor() as i32).clamp(0, max_lod.max(0))
}

/// True when a label from a tile at `tile_zoom` must not be built.
pub fn lod_rejects(max_zoom: f32, max_lod: i32, current_zoom: f32, tile_zoom: i32) -> bool {
    current_zoom - tile_zoom as f32 > lod_discard_capped(max_zoom, current_zoom, max_lod) as f32
}
