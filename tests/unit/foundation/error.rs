use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DatagifError::schema("x")
            .to_string()
            .contains("schema error:")
    );
    assert!(
        DatagifError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        DatagifError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(DatagifError::io("x").to_string().contains("io error:"));
}

#[test]
fn io_at_names_action_and_path() {
    let err = DatagifError::io_at(
        "read frame",
        Path::new("out/plot_1.png"),
        std::io::Error::other("gone"),
    );
    let msg = err.to_string();
    assert!(msg.contains("read frame 'out/plot_1.png'"));
    assert!(msg.contains("gone"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DatagifError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
