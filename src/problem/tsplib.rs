use crate::problem::Instance;
use std::path::Path;

/// Loads a TSPLIB-format instance (NODE_COORD_SECTION, EUC_2D weights).
pub fn load(path: &Path) -> Result<Instance, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Could not read {:?}: {}", path, e))?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    parse(fallback, &contents)
}

/// Parses the body of a TSPLIB file. `fallback_name` is used when the
/// header carries no NAME field.
pub fn parse(fallback_name: &str, contents: &str) -> Result<Instance, String> {
    let mut name = String::new();
    let mut dimension = 0usize;
    let mut in_node_section = false;
    // TSPLIB numbers cities from 1.
    let mut coords: Vec<Option<(f64, f64)>> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line == "EOF" {
            continue;
        }

        if in_node_section {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(format!("Malformed coordinate line: {:?}", line));
            }
            let id: usize = parts[0]
                .parse()
                .map_err(|e| format!("Bad node id {:?}: {}", parts[0], e))?;
            let x: f64 = parts[1]
                .parse()
                .map_err(|e| format!("Bad x coordinate {:?}: {}", parts[1], e))?;
            let y: f64 = parts[2]
                .parse()
                .map_err(|e| format!("Bad y coordinate {:?}: {}", parts[2], e))?;
            let idx = id
                .checked_sub(1)
                .ok_or_else(|| format!("Node id 0 in {:?}", line))?;
            if idx >= coords.len() {
                return Err(format!("Node id {} exceeds dimension {}", id, dimension));
            }
            coords[idx] = Some((x, y));
            continue;
        }

        if let Some(value) = line.strip_prefix("NAME") {
            name = value.trim_start().trim_start_matches(':').trim().to_string();
        } else if let Some(value) = line.strip_prefix("DIMENSION") {
            let v = value.trim_start().trim_start_matches(':').trim();
            dimension = v
                .parse()
                .map_err(|e| format!("Bad DIMENSION {:?}: {}", v, e))?;
            coords = vec![None; dimension];
        } else if line.starts_with("NODE_COORD_SECTION") {
            if dimension == 0 {
                return Err("NODE_COORD_SECTION before DIMENSION".into());
            }
            in_node_section = true;
        }
        // Other header fields (TYPE, COMMENT, EDGE_WEIGHT_TYPE, ...) carry
        // no information we use for EUC_2D instances.
    }

    if dimension == 0 {
        return Err("Missing or zero DIMENSION".into());
    }

    let coords = coords
        .into_iter()
        .enumerate()
        .map(|(i, c)| c.ok_or_else(|| format!("Missing coordinates for node {}", i + 1)))
        .collect::<Result<Vec<_>, String>>()?;

    if name.is_empty() {
        name = fallback_name.to_string();
    }

    Ok(Instance::from_coords(&name, coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Matrix2;

    const SMALL: &str = "\
NAME : square4
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 3.0 0.0
3 3.0 4.0
4 0.0 4.0
EOF
";

    #[test]
    fn parses_header_and_coordinates() {
        let instance = parse("fallback", SMALL).unwrap();
        assert_eq!(instance.name, "square4");
        assert_eq!(instance.n_cities, 4);
        assert_eq!(instance.coords[2], (3.0, 4.0));
    }

    #[test]
    fn builds_rounded_euclidean_matrix() {
        let instance = parse("fallback", SMALL).unwrap();

        let mut expected = Matrix2::new(4, 4, 0.0);
        let d = [
            (0, 1, 3.0),
            (0, 2, 5.0),
            (0, 3, 4.0),
            (1, 2, 4.0),
            (1, 3, 5.0),
            (2, 3, 3.0),
        ];
        for (i, j, v) in d {
            *expected.get_mut(i, j) = v;
            *expected.get_mut(j, i) = v;
        }

        assert_eq!(instance.distances, expected);
    }

    #[test]
    fn falls_back_to_file_stem_and_finds_bks() {
        let unnamed = SMALL.replace("NAME : square4\n", "");
        let instance = parse("berlin52", &unnamed).unwrap();
        assert_eq!(instance.name, "berlin52");
        assert_eq!(instance.optimal_cost, Some(7542.0));
    }

    #[test]
    fn rejects_missing_coordinates() {
        let truncated = SMALL.replace("4 0.0 4.0\n", "");
        assert!(parse("x", &truncated).is_err());
    }

    #[test]
    fn rejects_missing_dimension() {
        assert!(parse("x", "NAME : empty\nEOF\n").is_err());
    }
}
