//! Demo for the vecmat transform pipeline.
//! Builds view/projection matrices from CLI flags, projects a unit cube to
//! NDC and recovers the eye position from the inverted view matrix.

use anyhow::{Context, Result};
use vecmat::{Mat4, Vec3, transform::Transform, vec3};

/// Flags accepted on the command line, all `--name=value`.
struct Options {
    eye: Vec3,
    target: Vec3,
    fov_deg: f64,
    near: f64,
    far: f64,
    width: u32,
    height: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            eye: vec3(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_deg: 60.0,
            near: 0.1,
            far: 100.0,
            width: 1280,
            height: 720,
        }
    }
}

fn parse_vec3(v: &str) -> Option<Vec3> {
    let parts: Vec<f64> = v
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    Vec3::try_from(parts.as_slice()).ok()
}

fn parse_args() -> Options {
    let mut opts = Options::default();

    for arg in std::env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("--eye=") {
            match parse_vec3(v) {
                Some(p) => opts.eye = p,
                None => log::warn!("Bad --eye '{}', keeping {:?}", v, opts.eye),
            }
        } else if let Some(v) = arg.strip_prefix("--target=") {
            match parse_vec3(v) {
                Some(p) => opts.target = p,
                None => log::warn!("Bad --target '{}', keeping {:?}", v, opts.target),
            }
        } else if let Some(v) = arg.strip_prefix("--fov=") {
            match v.parse::<f64>() {
                Ok(f) if f > 0.0 && f < 180.0 => opts.fov_deg = f,
                _ => log::warn!("Bad --fov '{}', keeping {}", v, opts.fov_deg),
            }
        } else if let Some(v) = arg.strip_prefix("--near=") {
            match v.parse::<f64>() {
                Ok(n) => opts.near = n,
                Err(_) => log::warn!("Bad --near '{}', keeping {}", v, opts.near),
            }
        } else if let Some(v) = arg.strip_prefix("--far=") {
            match v.parse::<f64>() {
                Ok(f) => opts.far = f,
                Err(_) => log::warn!("Bad --far '{}', keeping {}", v, opts.far),
            }
        } else if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    opts.width = pw.max(1);
                    opts.height = ph.max(1);
                    continue;
                }
            }
            log::warn!("Bad --size '{}', expected WxH", v);
        } else {
            log::warn!("Unknown argument '{}', ignoring.", arg);
        }
    }

    if opts.near == opts.far {
        log::warn!("near == far ({}), projection will be degenerate", opts.near);
    }
    opts
}

fn cube_corners() -> [Vec3; 8] {
    let mut out = [Vec3::ZERO; 8];
    for (i, c) in out.iter_mut().enumerate() {
        let pick = |bit: usize| if i & bit != 0 { 0.5 } else { -0.5 };
        *c = vec3(pick(1), pick(2), pick(4));
    }
    out
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args();
    let aspect = opts.width as f64 / opts.height as f64;
    log::info!(
        "View eye={:?} target={:?} fov={}deg near={} far={} aspect={:.3}",
        opts.eye,
        opts.target,
        opts.fov_deg,
        opts.near,
        opts.far,
        aspect
    );

    let view = Mat4::look_at(opts.eye, opts.target, Vec3::Y);
    let proj = Mat4::perspective(opts.fov_deg.to_radians(), aspect, opts.near, opts.far);
    let model = Transform::from_trs(
        Vec3::ZERO,
        vec3(0.0, 30f64.to_radians(), 0.0),
        Vec3::ONE,
    );
    let mvp = proj * view * model.matrix();

    for corner in cube_corners() {
        let ndc = mvp.project_point(corner);
        let px = (ndc.x * 0.5 + 0.5) * opts.width as f64;
        let py = (1.0 - (ndc.y * 0.5 + 0.5)) * opts.height as f64;
        println!(
            "{:>5.2} {:>5.2} {:>5.2} -> ndc ({:>7.4}, {:>7.4}, {:>7.4}) px ({:>7.1}, {:>7.1})",
            corner.x, corner.y, corner.z, ndc.x, ndc.y, ndc.z, px, py
        );
    }

    let eye = view
        .inverse()
        .context("view matrix is singular (is `up` parallel to the view direction?)")?
        .transform_point(Vec3::ZERO);
    log::info!("Eye recovered from inverse view: {:?}", eye);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_three_numbers() {
        assert_eq!(parse_vec3("1, -2.5,3"), Some(vec3(1.0, -2.5, 3.0)));
        assert_eq!(parse_vec3("1,2"), None);
        assert_eq!(parse_vec3("1,2,x"), None);
    }

    #[test]
    fn cube_corners_are_distinct_and_centered() {
        let corners = cube_corners();
        let sum = corners.iter().fold(Vec3::ZERO, |acc, c| acc + *c);
        assert_eq!(sum, Vec3::ZERO);
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
