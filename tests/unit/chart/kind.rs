use super::*;

#[test]
fn parses_every_allow_listed_kind() {
    for kind in PlotKind::ALL {
        assert_eq!(kind.as_str().parse::<PlotKind>().unwrap(), kind);
    }
}

#[test]
fn unknown_kind_is_configuration_error() {
    let err = "violinplot".parse::<PlotKind>().unwrap_err();
    assert!(matches!(err, DatagifError::Configuration(_)));
    assert!(err.to_string().contains("scatterplot"));
}

#[test]
fn deserializes_from_json_string() {
    let k: PlotKind = serde_json::from_str("\"kdeplot\"").unwrap();
    assert_eq!(k, PlotKind::Kdeplot);
    assert!(serde_json::from_str::<PlotKind>("\"barplot\"").is_err());
}
