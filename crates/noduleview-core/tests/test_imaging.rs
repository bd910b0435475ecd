mod common;

use std::sync::Arc;

use noduleview_core::error::ViewerError;
use noduleview_core::handle::{HandleTracker, ImageRef};
use noduleview_core::imaging::{decode_data_uri, decode_image, image_bytes, save_image};

#[test]
fn test_decode_png_data_uri() {
    let uri = common::png_data_uri(6, 4);
    let decoded = decode_data_uri(&uri).unwrap();
    assert_eq!(decoded.mime, "image/png");
    assert_eq!(decoded.bytes, common::png_bytes(6, 4));
}

#[test]
fn test_data_uri_tolerates_line_breaks() {
    let uri = "data:image/png;base64,AAEC\nAwQF";
    assert_eq!(decode_data_uri(uri).unwrap().bytes, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_invalid_data_uris() {
    for uri in [
        "image/png;base64,AAAA",
        "data:image/png;base64",
        "data:image/svg+xml,<svg/>",
        "data:image/png;base64,***",
    ] {
        let err = decode_data_uri(uri).unwrap_err();
        assert!(matches!(err, ViewerError::MalformedResponse(_)), "{uri}: {err:?}");
    }
}

#[test]
fn test_server_image_decodes_to_pixels() {
    let image = ImageRef::Server(common::png_data_uri(8, 5));
    let decoded = decode_image(&image, None).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 5));
}

#[test]
fn test_local_handle_bytes_are_shared() {
    let tracker = HandleTracker::new();
    let shared: Arc<[u8]> = common::png_bytes(3, 3).into();
    let image = ImageRef::Local(tracker.acquire("a.png", Arc::clone(&shared)));
    let out = image_bytes(&image, None).unwrap();
    assert!(Arc::ptr_eq(&out, &shared));
}

#[test]
fn test_released_handle_has_no_bytes() {
    let tracker = HandleTracker::new();
    let image = ImageRef::Local(tracker.acquire("a.png", common::png_bytes(3, 3).into()));
    assert!(image.release());

    let err = image_bytes(&image, None).unwrap_err();
    assert!(matches!(err, ViewerError::Released(ref uri) if uri == image.uri()), "got {err:?}");
    assert!(matches!(decode_image(&image, None), Err(ViewerError::Released(_))));
}

#[test]
fn test_url_without_backend_is_unsupported() {
    let image = ImageRef::Server("http://example.invalid/heatmap.png".into());
    let err = image_bytes(&image, None).unwrap_err();
    assert!(matches!(err, ViewerError::UnsupportedFormat(_)));
}

#[test]
fn test_unknown_reference_is_malformed() {
    let image = ImageRef::Server("blob:abc".into());
    assert!(matches!(
        image_bytes(&image, None).unwrap_err(),
        ViewerError::MalformedResponse(_)
    ));
}

#[test]
fn test_save_heatmap_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heatmap.png");
    save_image(&ImageRef::Server(common::png_data_uri(7, 7)), None, &path).unwrap();

    let reloaded = image::open(&path).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (7, 7));
}
