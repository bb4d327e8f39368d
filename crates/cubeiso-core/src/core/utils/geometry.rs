use nalgebra::Vector3;

pub fn voxel_volume(axes: &[Vector3<f64>; 3]) -> f64 {
    let [a, b, c] = axes;
    a.dot(&b.cross(c)).abs()
}

pub fn average_axis_length(axes: &[Vector3<f64>; 3]) -> f64 {
    axes.iter().map(|v| v.norm()).sum::<f64>() / 3.0
}
