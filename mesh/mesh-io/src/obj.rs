//! Wavefront OBJ loading and saving.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{Point3, TriMesh};

use crate::error::{IoError, IoResult};

/// Load a triangle mesh from a Wavefront OBJ file.
///
/// Reads `v` and `f` statements and ignores everything else (normals,
/// texture coordinates, groups, materials). Face entries may use any of
/// the `i`, `i/t`, `i//n`, `i/t/n` forms; only the vertex index is kept.
/// Negative (relative) indices are resolved against the vertices declared
/// so far. Faces with more than three vertices are fan-triangulated.
///
/// # Errors
///
/// Returns an error when the file cannot be read, a coordinate or index
/// fails to parse, or a face references an undeclared vertex.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut coord = |name: &str| -> IoResult<f64> {
                    let token = parts.next().ok_or_else(|| {
                        IoError::invalid_content(format!(
                            "line {}: vertex is missing its {name} coordinate",
                            line_number + 1
                        ))
                    })?;
                    Ok(token.parse::<f64>()?)
                };
                let x = coord("x")?;
                let y = coord("y")?;
                let z = coord("z")?;
                positions.push(Point3::new(x, y, z));
            }
            Some("f") => {
                let mut indices: Vec<u32> = Vec::with_capacity(3);
                for token in parts {
                    indices.push(parse_face_vertex(token, positions.len())?);
                }
                if indices.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: face has {} vertices, need at least 3",
                        line_number + 1,
                        indices.len()
                    )));
                }
                for k in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[k], indices[k + 1]]);
                }
            }
            _ => {} // comments, normals, groups, ...
        }
    }

    Ok(TriMesh::from_parts(positions, faces))
}

/// Save a triangle mesh as an ASCII Wavefront OBJ file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn save_obj<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for &[i0, i1, i2] in &mesh.faces {
        // OBJ indices are 1-based.
        writeln!(out, "f {} {} {}", i0 + 1, i1 + 1, i2 + 1)?;
    }

    out.flush()?;
    Ok(())
}

/// Resolve one face-vertex token (`i`, `i/t`, `i//n`, `i/t/n`) to a
/// zero-based vertex index.
fn parse_face_vertex(token: &str, vertex_count: usize) -> IoResult<u32> {
    let index_part = token.split('/').next().unwrap_or(token);
    let raw: i64 = index_part.parse()?;

    let zero_based = if raw > 0 {
        usize::try_from(raw - 1).map_err(|_| invalid_index(raw))?
    } else if raw < 0 {
        // Relative indexing: -1 is the most recently declared vertex.
        let back = usize::try_from(-raw).map_err(|_| invalid_index(raw))?;
        vertex_count.checked_sub(back).ok_or_else(|| invalid_index(raw))?
    } else {
        return Err(invalid_index(raw));
    };

    if zero_based >= vertex_count {
        return Err(IoError::VertexIndexOutOfRange {
            index: zero_based,
            vertex_count,
        });
    }
    u32::try_from(zero_based).map_err(|_| invalid_index(raw))
}

fn invalid_index(raw: i64) -> IoError {
    IoError::invalid_content(format!("face vertex index {raw} is out of range"))
}
