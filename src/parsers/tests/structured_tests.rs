use crate::parsers::structured;
use crate::results::{ExtractionSource, MediaType};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_URL: &str = "https://scontent.cdninstagram.com/v/t50/clip.mp4?_nc_ht=x&oh=1";
    const DISPLAY_URL: &str = "https://scontent.cdninstagram.com/v/t51/display.jpg";
    const THUMBNAIL_SRC: &str = "https://scontent.cdninstagram.com/v/t51/thumb.jpg";

    fn shared_data_page(media: serde_json::Value) -> String {
        let state = json!({
            "config": { "viewer": null },
            "entry_data": { "PostPage": [ { "graphql": { "shortcode_media": media } } ] }
        });
        format!(
            "<html><head><script type=\"text/javascript\">window._sharedData = {};</script></head><body></body></html>",
            state
        )
    }

    fn additional_data_page(media: serde_json::Value) -> String {
        let data = json!({ "graphql": { "shortcode_media": media } });
        format!(
            "<html><body><script type=\"text/javascript\">window.__additionalDataLoaded('/p/CxYz123/',{});</script></body></html>",
            data
        )
    }

    fn linked_data_page(data: serde_json::Value) -> String {
        format!(
            "<html><head><script type=\"application/ld+json\">{}</script></head></html>",
            data
        )
    }

    #[test]
    fn test_shared_data_video() {
        let page = shared_data_page(json!({
            "__typename": "GraphVideo",
            "is_video": true,
            "video_url": VIDEO_URL,
            "display_url": DISPLAY_URL,
            "thumbnail_src": THUMBNAIL_SRC
        }));

        let record = structured::from_shared_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Video);
        assert_eq!(record.url, VIDEO_URL);
        assert_eq!(record.thumbnail.as_deref(), Some(DISPLAY_URL));
        assert_eq!(record.source, ExtractionSource::StructuredData);
    }

    #[test]
    fn test_video_detected_by_typename_only() {
        let page = shared_data_page(json!({
            "__typename": "GraphVideo",
            "video_url": VIDEO_URL,
            "thumbnail_src": THUMBNAIL_SRC
        }));

        let record = structured::from_shared_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Video);
        assert_eq!(record.thumbnail.as_deref(), Some(THUMBNAIL_SRC));
    }

    #[test]
    fn test_video_without_thumbnail() {
        let page = shared_data_page(json!({ "is_video": true, "video_url": VIDEO_URL }));

        let record = structured::from_shared_data(&page).unwrap();
        assert_eq!(record.url, VIDEO_URL);
        assert_eq!(record.thumbnail, None);
    }

    #[test]
    fn test_video_flag_without_video_url_is_rejected() {
        let page = shared_data_page(json!({
            "is_video": true,
            "display_url": DISPLAY_URL
        }));
        assert!(structured::from_shared_data(&page).is_none());

        let page = shared_data_page(json!({
            "__typename": "GraphVideo",
            "video_url": "",
            "display_url": DISPLAY_URL
        }));
        assert!(structured::from_shared_data(&page).is_none());
    }

    #[test]
    fn test_image_node_fallbacks() {
        let page = shared_data_page(json!({
            "__typename": "GraphImage",
            "is_video": false,
            "display_url": DISPLAY_URL,
            "thumbnail_src": THUMBNAIL_SRC
        }));
        let record = structured::from_shared_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Image);
        assert_eq!(record.url, DISPLAY_URL);
        assert_eq!(record.thumbnail, None);

        let page = shared_data_page(json!({ "thumbnail_src": THUMBNAIL_SRC }));
        let record = structured::from_shared_data(&page).unwrap();
        assert_eq!(record.url, THUMBNAIL_SRC);

        let page = shared_data_page(json!({ "__typename": "GraphImage" }));
        assert!(structured::from_shared_data(&page).is_none());
    }

    #[test]
    fn test_shared_data_missing_path() {
        let page = "<script>window._sharedData = {\"entry_data\": {\"ProfilePage\": []}};</script>";
        assert!(structured::from_shared_data(page).is_none());

        let page = "<script>window._sharedData = {\"entry_data\": {\"PostPage\": []}};</script>";
        assert!(structured::from_shared_data(page).is_none());
    }

    #[test]
    fn test_shared_data_malformed_json() {
        let page = "<script>window._sharedData = {\"entry_data\": {\"PostPage\": [{]}};</script>";
        assert!(structured::from_shared_data(page).is_none());
    }

    #[test]
    fn test_xdt_media_node_key() {
        let data = json!({
            "graphql": { "xdt_shortcode_media": { "is_video": true, "video_url": VIDEO_URL } }
        });
        let page = format!(
            "<script>window.__additionalDataLoaded(\"/reel/CxYz123/\", {});</script>",
            data
        );

        let record = structured::from_additional_data(&page).unwrap();
        assert_eq!(record.url, VIDEO_URL);
    }

    #[test]
    fn test_additional_data_image() {
        let page = additional_data_page(json!({
            "__typename": "GraphImage",
            "display_url": DISPLAY_URL
        }));

        let record = structured::from_additional_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Image);
        assert_eq!(record.url, DISPLAY_URL);
        assert!(structured::from_shared_data(&page).is_none());
    }

    #[test]
    fn test_additional_data_followed_by_more_script() {
        let data = json!({ "graphql": { "shortcode_media": { "display_url": DISPLAY_URL } } });
        let page = format!(
            "<script>window.__additionalDataLoaded('/p/CxYz123/',{});window.__bufferedLoad = true;</script>",
            data
        );

        let record = structured::from_additional_data(&page).unwrap();
        assert_eq!(record.url, DISPLAY_URL);
    }

    #[test]
    fn test_additional_data_inside_wrapper_function() {
        let data = json!({
            "graphql": { "shortcode_media": { "is_video": true, "video_url": VIDEO_URL } }
        });
        let page = format!(
            "<script>requireLazy(function(){{window.__additionalDataLoaded('/p/CxYz123/',{});}});</script>",
            data
        );

        let record = structured::from_additional_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Video);
        assert_eq!(record.url, VIDEO_URL);
    }

    #[test]
    fn test_additional_data_malformed_json() {
        let page = "<script>window.__additionalDataLoaded('/p/x/',{\"graphql\": nope});</script>";
        assert!(structured::from_additional_data(page).is_none());
    }

    #[test]
    fn test_linked_data_video_sequence() {
        let page = linked_data_page(json!({
            "@context": "https://schema.org",
            "@type": "SocialMediaPosting",
            "video": [
                { "contentUrl": VIDEO_URL, "thumbnailUrl": THUMBNAIL_SRC },
                { "contentUrl": "https://cdn.example.com/second.mp4" }
            ],
            "image": [DISPLAY_URL]
        }));

        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Video);
        assert_eq!(record.url, VIDEO_URL);
        assert_eq!(record.thumbnail.as_deref(), Some(THUMBNAIL_SRC));
    }

    #[test]
    fn test_linked_data_video_empty_thumbnail() {
        let page = linked_data_page(json!({
            "video": [ { "contentUrl": VIDEO_URL, "thumbnailUrl": "" } ]
        }));

        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.url, VIDEO_URL);
        assert_eq!(record.thumbnail, None);
    }

    #[test]
    fn test_linked_data_array_root() {
        let page = linked_data_page(json!([
            { "video": [ { "contentUrl": VIDEO_URL } ] },
            { "image": DISPLAY_URL }
        ]));

        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.url, VIDEO_URL);
    }

    #[test]
    fn test_linked_data_falls_back_to_image() {
        let page = linked_data_page(json!({ "video": [], "image": DISPLAY_URL }));
        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.media_type, MediaType::Image);
        assert_eq!(record.url, DISPLAY_URL);

        let page = linked_data_page(json!({ "image": [THUMBNAIL_SRC, DISPLAY_URL] }));
        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.url, THUMBNAIL_SRC);

        let page = linked_data_page(json!({ "image": [ { "url": DISPLAY_URL } ] }));
        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.url, DISPLAY_URL);
    }

    #[test]
    fn test_linked_data_empty_image_never_succeeds() {
        let page = linked_data_page(json!({ "image": [] }));
        assert!(structured::from_linked_data(&page).is_none());

        let page = linked_data_page(json!({ "image": "" }));
        assert!(structured::from_linked_data(&page).is_none());

        let page = linked_data_page(json!({ "video": [ { "name": "no url" } ], "image": [""] }));
        assert!(structured::from_linked_data(&page).is_none());
    }

    #[test]
    fn test_linked_data_skips_unusable_blocks() {
        let page = format!(
            "<script type=\"application/ld+json\">{{not json</script>\
             <script type=\"application/ld+json\">{}</script>\
             <script type=\"application/ld+json\">{}</script>",
            json!({ "@type": "BreadcrumbList" }),
            json!({ "image": DISPLAY_URL })
        );

        let record = structured::from_linked_data(&page).unwrap();
        assert_eq!(record.url, DISPLAY_URL);
    }

    #[test]
    fn test_shape_priority() {
        let page = format!(
            "{}{}{}",
            shared_data_page(json!({ "is_video": true, "video_url": VIDEO_URL })),
            additional_data_page(json!({ "display_url": DISPLAY_URL })),
            linked_data_page(json!({ "image": THUMBNAIL_SRC }))
        );
        assert_eq!(structured::extract(&page).unwrap().url, VIDEO_URL);

        let page = format!(
            "{}{}",
            additional_data_page(json!({ "display_url": DISPLAY_URL })),
            linked_data_page(json!({ "image": THUMBNAIL_SRC }))
        );
        assert_eq!(structured::extract(&page).unwrap().url, DISPLAY_URL);
    }

    #[test]
    fn test_no_structured_data() {
        let page = "<html><head><title>Instagram</title></head><body>Login</body></html>";
        assert!(structured::extract(page).is_none());
    }

    #[test]
    fn test_normalize_media_node_truthiness() {
        let node = json!({ "is_video": 1, "video_url": VIDEO_URL });
        assert_eq!(
            structured::normalize_media_node(&node).unwrap().media_type,
            MediaType::Video
        );

        let node = json!({ "is_video": null, "display_url": DISPLAY_URL });
        assert_eq!(
            structured::normalize_media_node(&node).unwrap().media_type,
            MediaType::Image
        );

        let node = json!({ "is_video": "0", "display_url": DISPLAY_URL });
        assert_eq!(
            structured::normalize_media_node(&node).unwrap().media_type,
            MediaType::Image
        );
    }
}
