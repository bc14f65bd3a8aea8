/// Integration tests for mdf2iso

use mdf2iso::format::{ISO_9660_SIGNATURE, SYNC_HEADER, SYNC_HEADER_MDF, SYNC_HEADER_MDF_AUDIO};
use mdf2iso::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Build `sectors` sectors of `size` bytes where each sector is filled with
/// its index, then stamp the sync windows at offsets 0 and 2352
fn write_image(path: &Path, sectors: usize, size: usize, first: &[u8], second: &[u8]) -> Vec<u8> {
    let mut data: Vec<u8> = (0..sectors * size).map(|i| (i / size) as u8).collect();
    data[..first.len()].copy_from_slice(first);
    data[2352..2352 + second.len()].copy_from_slice(second);
    fs::write(path, &data).expect("Failed to write image");
    data
}

fn converted(outcome: ConversionOutcome) -> ConversionReport {
    match outcome {
        ConversionOutcome::Converted(report) => report,
        ConversionOutcome::AlreadyIso => panic!("expected a conversion"),
    }
}

fn setup() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("disc.mdf");
    (dir, source)
}

#[test]
fn test_mdf_data_to_iso() {
    let (dir, source) = setup();
    let data = write_image(&source, 20, 2448, &SYNC_HEADER, &SYNC_HEADER_MDF);

    let mut progress = RecordedProgress::default();
    let report = converted(convert(&ConvertOptions::new(&source), &mut progress).unwrap());

    assert_eq!(report.layout, SourceLayout::MdfData);
    assert_eq!(report.mode, OutputMode::Iso);
    assert_eq!(report.output, dir.path().join("disc.iso"));
    assert!(report.sidecar.is_none());
    assert_eq!(report.stats.sectors, 20);

    let iso = fs::read(&report.output).unwrap();
    assert_eq!(iso.len(), 20 * 2048);
    for i in 0..20 {
        assert_eq!(&iso[i * 2048..(i + 1) * 2048], &data[i * 2448 + 16..i * 2448 + 16 + 2048]);
    }

    assert!(progress.finished);
    assert!(progress.updates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_mdf_data_to_cue() {
    let (dir, source) = setup();
    write_image(&source, 4, 2448, &SYNC_HEADER, &SYNC_HEADER_MDF);

    let options = ConvertOptions::new(&source).mode(OutputMode::Cue);
    let report = converted(convert(&options, &mut NoProgress).unwrap());

    let bin = dir.path().join("disc.bin");
    let cue = dir.path().join("disc.cue");
    assert_eq!(report.output, bin);
    assert!(!dir.path().join("disc.iso").exists());
    assert_eq!(fs::metadata(&bin).unwrap().len(), 4 * 2352);

    let sheet = fs::read_to_string(&cue).unwrap();
    assert_eq!(sheet, cue_sheet(&bin.to_string_lossy()));
    assert!(sheet.contains("TRACK 01 MODE2/2352"));
}

#[test]
fn test_mdf_data_to_toc_keeps_sub_channel() {
    let (dir, source) = setup();
    let data = write_image(&source, 3, 2448, &SYNC_HEADER, &SYNC_HEADER_MDF);

    let options = ConvertOptions::new(&source).mode(OutputMode::Toc);
    let report = converted(convert(&options, &mut NoProgress).unwrap());

    assert!(report.geometry.sub_channel);
    let dat = dir.path().join("disc.dat");
    assert_eq!(fs::read(&dat).unwrap(), data);

    let toc = fs::read_to_string(dir.path().join("disc.toc")).unwrap();
    assert!(toc.contains("TRACK MODE1_RAW RW_RAW"));
}

#[test]
fn test_plain_raw_to_toc_without_sub_channel() {
    let (dir, source) = setup();
    write_image(&source, 3, 2352, &SYNC_HEADER, &SYNC_HEADER);

    let options = ConvertOptions::new(&source).mode(OutputMode::Toc);
    let report = converted(convert(&options, &mut NoProgress).unwrap());

    assert_eq!(report.layout, SourceLayout::PlainRaw);
    let toc = fs::read_to_string(dir.path().join("disc.toc")).unwrap();
    assert!(toc.contains("TRACK MODE1_RAW\n"));
    assert!(!toc.contains("RW_RAW"));
}

#[test]
fn test_plain_raw_to_iso_with_explicit_destination() {
    let (dir, source) = setup();
    let data = write_image(&source, 5, 2352, &SYNC_HEADER, &SYNC_HEADER);
    let dest = dir.path().join("out.iso");

    let options = ConvertOptions::new(&source).destination(&dest);
    let report = converted(convert(&options, &mut NoProgress).unwrap());

    assert_eq!(report.output, dest);
    let iso = fs::read(&dest).unwrap();
    assert_eq!(iso.len(), 5 * 2048);
    assert_eq!(&iso[2048..4096], &data[2352 + 16..2352 + 16 + 2048]);
}

#[test]
fn test_audio_cue_request_overridden() {
    let (dir, source) = setup();
    write_image(&source, 2, 2448, &[0u8; 12], &SYNC_HEADER_MDF_AUDIO);

    let options = ConvertOptions::new(&source).mode(OutputMode::Cue);
    let report = converted(convert(&options, &mut NoProgress).unwrap());

    assert_eq!(report.layout, SourceLayout::MdfAudio);
    assert_eq!(report.mode, OutputMode::Iso);
    assert!(report.cue_overridden);
    assert!(report.sidecar.is_none());
    assert!(!dir.path().join("disc.cue").exists());
    assert_eq!(fs::metadata(dir.path().join("disc.iso")).unwrap().len(), 2 * 2352);
}

#[test]
fn test_already_iso_writes_nothing() {
    let (dir, source) = setup();
    let mut data = vec![0u8; 40_000];
    data[32_768..32_776].copy_from_slice(&ISO_9660_SIGNATURE);
    fs::write(&source, &data).unwrap();

    let outcome = convert(&ConvertOptions::new(&source), &mut NoProgress).unwrap();

    assert_eq!(outcome, ConversionOutcome::AlreadyIso);
    assert!(!dir.path().join("disc.iso").exists());
}

#[test]
fn test_already_iso_named_like_destination() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("disc.iso");
    let mut data = vec![0u8; 40_000];
    data[32_768..32_776].copy_from_slice(&ISO_9660_SIGNATURE);
    fs::write(&source, &data).unwrap();

    let outcome = convert(&ConvertOptions::new(&source), &mut NoProgress).unwrap();

    assert_eq!(outcome, ConversionOutcome::AlreadyIso);
    assert_eq!(fs::read(&source).unwrap(), data);
}

#[test]
fn test_destination_aliasing_source_left_untouched() {
    let (dir, source) = setup();
    let data = write_image(&source, 4, 2352, &SYNC_HEADER, &SYNC_HEADER);
    fs::create_dir(dir.path().join("sub")).unwrap();
    let alias = dir.path().join("sub").join("..").join("disc.mdf");

    let options = ConvertOptions::new(&source).destination(&alias);
    let err = convert(&options, &mut NoProgress).unwrap_err();

    assert!(matches!(err, Mdf2IsoError::InvalidArguments(_)));
    assert_eq!(fs::read(&source).unwrap(), data);
}

#[test]
fn test_unknown_format_writes_nothing() {
    let (dir, source) = setup();
    fs::write(&source, vec![0x42u8; 2448 * 3]).unwrap();

    let err = convert(&ConvertOptions::new(&source), &mut NoProgress).unwrap_err();

    assert!(matches!(err, Mdf2IsoError::UnknownFormat(_)));
    assert!(!dir.path().join("disc.iso").exists());
}

#[test]
fn test_missing_source() {
    let (_dir, source) = setup();
    let err = convert(&ConvertOptions::new(&source), &mut NoProgress).unwrap_err();
    assert!(matches!(err, Mdf2IsoError::Io(_)));
}

#[test]
fn test_cue_and_toc_together_rejected() {
    let err = OutputMode::from_flags(true, true).unwrap_err();
    assert!(matches!(err, Mdf2IsoError::InvalidArguments(_)));
}
