use std::collections::HashSet;
use std::path::Path;

fn main() {
    let colors_path = Path::new("catalogs/colors.json");
    let combinations_path = Path::new("catalogs/combinations.json");

    let combinations = read_dataset(combinations_path);
    let colors = read_dataset(colors_path);

    let known_ids = validate_combinations(&combinations);
    let referenced = validate_colors(&colors, &known_ids);

    println!(
        "cargo:warning=Validated catalog: {} colors, {} combinations ({referenced} color-combination links)",
        colors.len(),
        combinations.len()
    );

    set_build_dependencies();
}

fn read_dataset(path: &Path) -> Vec<serde_json::Value> {
    // Ensure data set exists at build time
    assert!(
        path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let value: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            path.display()
        );
    });

    match value {
        serde_json::Value::Array(records) => records,
        other => panic!(
            "\n\nCATALOG BUILD ERROR: Root must be a JSON array\n\
             Path: {}\n\
             Got: {other}\n",
            path.display()
        ),
    }
}

fn is_hex_color(value: Option<&serde_json::Value>) -> bool {
    value
        .and_then(serde_json::Value::as_str)
        .map(|s| s.strip_prefix('#').unwrap_or(s))
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

fn validate_combinations(combinations: &[serde_json::Value]) -> HashSet<u64> {
    let mut ids = HashSet::new();

    for (index, combination) in combinations.iter().enumerate() {
        let id = combination
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Combination at index {index} missing integer 'id' field\n"
                )
            });

        assert!(
            ids.insert(id),
            "\n\nCATALOG BUILD ERROR: Duplicate combination id {id} (index {index})\n"
        );

        let colors = combination
            .get("colors")
            .and_then(serde_json::Value::as_array)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Combination {id} missing 'colors' array\n")
            });

        for (j, color) in colors.iter().enumerate() {
            assert!(
                color.get("name").and_then(serde_json::Value::as_str).is_some(),
                "\n\nCATALOG BUILD ERROR: Combination {id} color {j} missing 'name' field\n"
            );
            assert!(
                is_hex_color(color.get("hex")),
                "\n\nCATALOG BUILD ERROR: Combination {id} color {j} has missing or invalid 'hex'\n\
                 Expected 6 hex digits, optionally prefixed with '#'.\n"
            );
        }
    }

    ids
}

fn validate_colors(colors: &[serde_json::Value], known_ids: &HashSet<u64>) -> usize {
    let mut links = 0;

    for (index, color) in colors.iter().enumerate() {
        let name = color
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Color at index {index} missing 'name' field\n")
            });

        assert!(
            is_hex_color(color.get("hex")),
            "\n\nCATALOG BUILD ERROR: Color '{name}' (index {index}) has missing or invalid 'hex'\n"
        );

        let lab_ok = color
            .get("lab")
            .and_then(serde_json::Value::as_array)
            .is_some_and(|lab| lab.len() == 3 && lab.iter().all(serde_json::Value::is_number));
        assert!(
            lab_ok,
            "\n\nCATALOG BUILD ERROR: Color '{name}' (index {index}) 'lab' must be an array of 3 numbers\n"
        );

        let ids = color
            .get("combinations")
            .and_then(serde_json::Value::as_array)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Color '{name}' missing 'combinations' array\n")
            });
        for id in ids {
            let id = id.as_u64().unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Color '{name}' has a non-integer combination id: {id}\n"
                )
            });
            assert!(
                known_ids.contains(&id),
                "\n\nCATALOG BUILD ERROR: Color '{name}' references missing combination {id}\n"
            );
            links += 1;
        }
    }

    links
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the catalog changes
    println!("cargo:rerun-if-changed=catalogs/colors.json");
    println!("cargo:rerun-if-changed=catalogs/combinations.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
