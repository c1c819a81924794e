// SPDX-License-Identifier: MPL-2.0
use image_rs::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use variant_lens::catalog::{Catalog, CatalogFilter, SortDirection, SortKey, SortSpec};
use variant_lens::config::{self, Config, SubjectConfig};
use variant_lens::i18n::I18n;
use variant_lens::turntable::{
    load_sequence, FrameTemplate, LoadError, Phase, PlaybackSettings, Subject, SubjectRoot,
    Turntable,
};

fn write_frame(dir: &Path, name: &str, shade: u8) {
    RgbaImage::from_pixel(8, 6, Rgba([shade, shade, shade, 255]))
        .save(dir.join(name))
        .expect("write frame");
}

fn local_subject(id: &str, dir: &Path) -> Subject {
    Subject {
        id: id.to_string(),
        label: id.to_string(),
        root: SubjectRoot::Local(dir.to_path_buf()),
    }
}

fn png_template() -> FrameTemplate {
    FrameTemplate {
        extension: "png".to_string(),
        ..FrameTemplate::default()
    }
}

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut initial = Config::default();
    initial.general.language = Some("en-US".to_string());
    config::save_to_path(&initial, &path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("turntable-play"), "Play");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("turntable-play"), "Lecture");
}

#[test]
fn subjects_and_turntable_settings_survive_round_trip() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.turntable.frame_limit = Some(36);
    config.turntable.file_prefix = Some("spin_".to_string());
    config.turntable.autoplay = Some(false);
    config.subjects = vec![SubjectConfig {
        id: "lamp".to_string(),
        label: None,
        location: "https://cdn.example.com/lamp/".to_string(),
    }];
    config::save_to_path(&config, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded, config);
    assert_eq!(loaded.turntable.frame_limit(), 36);
    assert_eq!(loaded.turntable.frame_template().file_name(3), "spin_03.jpg");
    assert!(!loaded.turntable.playback_settings().autoplay);

    let subjects = loaded.resolved_subjects(None);
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].label, "Lamp");
    assert_eq!(
        subjects[0].root,
        SubjectRoot::Remote("https://cdn.example.com/lamp".to_string())
    );
}

#[test]
fn category_filter_with_descending_complexity() {
    let dataset = r##"
        [[variants]]
        name = "v1"
        category = "A"
        refraction_type = "color"
        refraction_rate = 10
        art_clarity = 10
        complexity = 200
        clean_vs_busy = 10
        base_color = { name = "Red", hex = "#FF0000" }
        pattern = { name = "Plain" }

        [[variants]]
        name = "v2"
        category = "A"
        refraction_type = "color"
        refraction_rate = 10
        art_clarity = 10
        complexity = 900
        clean_vs_busy = 10
        base_color = { name = "Red", hex = "#FF0000" }
        pattern = { name = "Plain" }

        [[variants]]
        name = "v3"
        category = "B"
        refraction_type = "monochrome"
        refraction_rate = 10
        art_clarity = 10
        complexity = 100
        clean_vs_busy = 10
        base_color = { name = "Blue", hex = "#0000FF" }
        pattern = { name = "Plain" }

        [[variants]]
        name = "v4"
        category = "A"
        refraction_type = "monochrome"
        refraction_rate = 10
        art_clarity = 10
        complexity = 900
        clean_vs_busy = 10
        base_color = { name = "Blue", hex = "#0000FF" }
        pattern = { name = "Plain" }

        [[variants]]
        name = "v5"
        category = "B"
        refraction_type = "color"
        refraction_rate = 10
        art_clarity = 10
        complexity = 300
        clean_vs_busy = 10
        base_color = { name = "Red", hex = "#FF0000" }
        pattern = { name = "Plain" }
    "##;

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(&path, dataset).expect("write dataset");
    let catalog = Catalog::load(Some(&path)).expect("valid dataset");

    let filter = CatalogFilter {
        category: Some("A".to_string()),
        sort: Some(SortSpec::new(SortKey::Complexity, SortDirection::Descending)),
        ..CatalogFilter::default()
    };
    let names: Vec<&str> = filter
        .apply(catalog.variants())
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["v2", "v4", "v1"]);

    let ascending = CatalogFilter {
        sort: Some(SortSpec::new(SortKey::Complexity, SortDirection::Ascending)),
        ..filter
    };
    let names: Vec<&str> = ascending
        .apply(catalog.variants())
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["v1", "v2", "v4"]);
}

#[test]
fn bundled_catalog_is_valid() {
    let catalog = Catalog::embedded().expect("bundled catalog");
    assert!(!catalog.is_empty());
    assert!(catalog.variants().iter().any(|v| v.is_specialty()));
    assert!(catalog.categories().iter().all(|c| !c.variants.is_empty()));
}

#[tokio::test]
async fn local_frames_load_in_index_order_with_gaps() {
    let dir = tempdir().expect("temp dir");
    write_frame(dir.path(), "img04.png", 40);
    write_frame(dir.path(), "img01.png", 10);
    write_frame(dir.path(), "img02.png", 20);
    write_frame(dir.path(), "img30.png", 255);

    let sequence = load_sequence(local_subject("mug", dir.path()), png_template(), 25)
        .await
        .expect("sequence");

    assert_eq!(sequence.indices(), vec![1, 2, 4]);
    assert_eq!(sequence.get(0).map(|f| f.dimensions()), Some((8, 6)));
}

#[tokio::test]
async fn loaded_sequence_bounces_through_turntable() {
    let dir = tempdir().expect("temp dir");
    for index in 1..=3 {
        write_frame(dir.path(), &format!("img{index:02}.png"), index * 10);
    }

    let mut turntable = Turntable::new(PlaybackSettings::default());
    let request = turntable.select_subject("mug");
    let result = load_sequence(local_subject("mug", dir.path()), png_template(), 25).await;
    assert!(turntable.finish_load(request.generation, result));
    assert_eq!(turntable.phase(), Phase::Playing);

    let mut cursors = Vec::new();
    for _ in 0..6 {
        turntable.tick();
        cursors.push(turntable.cursor());
    }
    assert_eq!(cursors, [1, 2, 2, 1, 0, 0]);
}

#[tokio::test]
async fn directory_without_frames_is_empty_not_error() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("readme.txt"), "no frames here").expect("write");

    let mut turntable = Turntable::new(PlaybackSettings::default());
    let request = turntable.select_subject("empty");
    let result = load_sequence(local_subject("empty", dir.path()), png_template(), 25).await;

    assert!(result.as_ref().is_ok_and(|s| s.is_empty()));
    turntable.finish_load(request.generation, result);
    assert_eq!(turntable.phase(), Phase::Empty);
    assert!(turntable.current_frame().is_none());
}

#[tokio::test]
async fn missing_directory_is_unavailable() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope");

    let result = load_sequence(local_subject("ghost", &missing), png_template(), 25).await;
    assert!(matches!(
        result,
        Err(LoadError::SubjectUnavailable { ref subject, .. }) if subject == "ghost"
    ));
}

#[tokio::test]
async fn undecodable_frames_fail_the_load() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("img01.png"), b"definitely not a png").expect("write");
    fs::write(dir.path().join("img02.png"), b"still not a png").expect("write");

    let result = load_sequence(local_subject("broken", dir.path()), png_template(), 25).await;
    assert_eq!(
        result.err(),
        Some(LoadError::NoDecodableFrames {
            subject: "broken".to_string()
        })
    );
}
