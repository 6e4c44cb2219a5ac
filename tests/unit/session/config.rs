use super::*;

#[test]
fn defaults_match_the_reference_tool() {
    let opts = AnimationOptions::default();
    assert_eq!(opts.cmap, "Spectral");
    assert_eq!(opts.units, "degrees");
    assert_eq!(opts.output, PathBuf::from("dynamic_images.mp4"));
    assert_eq!(opts.interval_ms, 50);
    assert!(!opts.repeat);
    assert_eq!(opts.fps().unwrap(), Fps::new(30, 1).unwrap());
    opts.validate().unwrap();
}

#[test]
fn missing_fps_follows_interval() {
    let opts = AnimationOptions {
        fps: None,
        interval_ms: 40,
        ..AnimationOptions::default()
    };
    assert!((opts.fps().unwrap().as_f64() - 25.0).abs() < 1e-12);
}

#[test]
fn frame_title_uses_four_decimals() {
    let opts = AnimationOptions::default();
    assert_eq!(
        opts.frame_title(-12.5),
        "Faraday Depth Spectrum at -12.5000 rad/m^2"
    );

    let bare = AnimationOptions {
        frame_title_prefix: String::new(),
        axis_unit: String::new(),
        ..AnimationOptions::default()
    };
    assert_eq!(bare.frame_title(1.0), "1.0000");
}

#[test]
fn validate_rejects_bad_settings() {
    let zero_interval = AnimationOptions {
        interval_ms: 0,
        ..AnimationOptions::default()
    };
    assert!(matches!(zero_interval.validate(), Err(CubeAnimError::Config(_))));

    let zero_fps = AnimationOptions {
        fps: Some(0),
        ..AnimationOptions::default()
    };
    assert!(matches!(zero_fps.validate(), Err(CubeAnimError::Config(_))));

    let odd_mp4 = AnimationOptions {
        width: 641,
        ..AnimationOptions::default()
    };
    assert!(matches!(odd_mp4.validate(), Err(CubeAnimError::Config(_))));

    let odd_gif = AnimationOptions {
        width: 641,
        output: PathBuf::from("anim.gif"),
        ..AnimationOptions::default()
    };
    odd_gif.validate().unwrap();

    let tiny = AnimationOptions {
        width: 10,
        height: 10,
        ..AnimationOptions::default()
    };
    assert!(matches!(tiny.validate(), Err(CubeAnimError::Config(_))));
}

#[test]
fn unknown_units_depend_on_policy() {
    let strict = AnimationOptions {
        units: "furlongs".to_owned(),
        ..AnimationOptions::default()
    };
    assert!(matches!(strict.unit(), Err(CubeAnimError::Config(_))));

    let lenient = AnimationOptions {
        unit_policy: UnitPolicy::Lenient,
        ..strict
    };
    assert_eq!(lenient.unit().unwrap(), AngularUnit::Degrees);
}

#[test]
fn job_file_parses_flattened_options_and_inline_cube() {
    let job = JobFile::from_json_str(
        r#"{
            "header": {"CDELT1": 0.5, "cdelt2": 0.5, "crpix1": 50, "crpix2": 50, "BUNIT": "Jy"},
            "cube": {"axis": [0.0, 1.0], "frames": [[[1, 2]], [[3, null]]]},
            "cmap": "viridis",
            "vmin": -1,
            "vmax": 4,
            "output": "out/anim.gif",
            "repeat": true
        }"#,
    )
    .unwrap();

    assert_eq!(job.options.cmap, "viridis");
    assert_eq!(job.options.vmin, Some(-1.0));
    assert!(job.options.repeat);
    assert_eq!(job.options.interval_ms, 50);
    assert_eq!(job.header.len(), 5);

    let cube = job.load_cube(Path::new(".")).unwrap();
    assert_eq!(cube.len(), 2);
    assert_eq!(cube.frame_shape(), (1, 2));
    assert!(cube.frames()[1].data()[1].is_nan());
}

#[test]
fn job_file_needs_exactly_one_cube_source() {
    let neither = JobFile::from_json_str(r#"{"header": {}}"#).unwrap();
    assert!(matches!(
        neither.load_cube(Path::new(".")),
        Err(CubeAnimError::Config(_))
    ));

    let both = JobFile::from_json_str(
        r#"{"header": {}, "cube": {"axis": [0], "frames": [[[1]]]}, "cube_path": "c.json"}"#,
    )
    .unwrap();
    assert!(matches!(
        both.load_cube(Path::new(".")),
        Err(CubeAnimError::Config(_))
    ));
}

#[test]
fn cube_path_resolves_against_job_dir() {
    let dir = std::env::temp_dir().join(format!("cubeanim_job_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("cube.json"),
        r#"{"axis": [5.0], "frames": [[[1, 2], [3, 4]]]}"#,
    )
    .unwrap();

    let job = JobFile::from_json_str(r#"{"header": {}, "cube_path": "cube.json"}"#).unwrap();
    let cube = job.load_cube(&dir).unwrap();
    assert_eq!(cube.axis(), &[5.0]);
    assert_eq!(cube.frame_shape(), (2, 2));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_job_is_a_serde_error() {
    assert!(matches!(
        JobFile::from_json_str("{not json"),
        Err(CubeAnimError::Serde(_))
    ));
}

#[test]
fn misspelled_option_is_a_config_error() {
    let err = JobFile::from_json_str(
        r#"{"header": {}, "cube_path": "cube.json", "unit": "arcmin", "fps": 10}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CubeAnimError::Config(_)));
    assert!(err.to_string().contains("unit"));

    let mut job = JobFile::from_json_str(r#"{"header": {}, "units": "arcmin"}"#).unwrap();
    assert_eq!(job.options.units, "arcmin");
    assert!(job.extra.is_empty());
    job.extra.insert("cmpa".to_owned(), "viridis".into());
    assert!(matches!(
        job.check_unknown_keys(),
        Err(CubeAnimError::Config(_))
    ));
}
