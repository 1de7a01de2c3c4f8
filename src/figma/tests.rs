//! Tests for Figma API types and client behaviour.

#[cfg(test)]
mod tests {
    use crate::figma::api_types::{
        DesignNode, EffectType, FigmaColor, FigmaImageFills, FigmaNodesResponse, ImageFormat,
        LayoutMode, NodeKind, Paint, PaintType,
    };
    use crate::figma::client::{FigmaClient, FigmaError};
    use crate::figma::fetch_design;
    use serde_json::json;

    #[test]
    fn test_figma_client_missing_token() {
        let result = FigmaClient::new("");
        assert!(matches!(result.unwrap_err(), FigmaError::MissingToken));
    }

    #[test]
    fn test_image_format_as_str() {
        assert_eq!(ImageFormat::Png.as_str(), "png");
        assert_eq!(ImageFormat::Jpg.as_str(), "jpg");
        assert_eq!(ImageFormat::Svg.as_str(), "svg");
        assert!(ImageFormat::Png.is_raster());
        assert!(!ImageFormat::Pdf.is_raster());
    }

    #[test]
    fn test_figma_color_to_hex() {
        let color = FigmaColor {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_figma_color_to_hex_black() {
        assert_eq!(FigmaColor::rgb(0.0, 0.0, 0.0).to_hex(), "#000000");
    }

    #[test]
    fn test_figma_color_to_css_uses_rgba_when_translucent() {
        let color = FigmaColor {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.333,
        };
        assert_eq!(color.to_css(), "rgba(0, 0, 0, 0.33)");
        assert_eq!(FigmaColor::rgb(1.0, 1.0, 1.0).to_css(), "#ffffff");
        assert_eq!(
            FigmaColor::rgb(1.0, 0.0, 0.0).to_css_with_opacity(0.5),
            "rgba(255, 0, 0, 0.5)"
        );
    }

    #[test]
    fn test_out_of_range_channels_are_clamped() {
        let color = FigmaColor {
            r: 1.4,
            g: -0.2,
            b: 0.5,
            a: 1.0,
        };
        assert_eq!(color.to_hex(), "#ff0080");
    }

    #[test]
    fn test_node_kind_round_trips_raw_string() {
        let node: DesignNode = serde_json::from_value(json!({ "type": "COMPONENT_SET" })).unwrap();
        assert_eq!(node.kind, NodeKind::ComponentSet);
        assert_eq!(node.kind.slug(), "component-set");

        let unknown: DesignNode = serde_json::from_value(json!({ "type": "MEDIA" })).unwrap();
        assert_eq!(unknown.kind, NodeKind::Other("MEDIA".into()));
        let value = serde_json::to_value(&unknown).unwrap();
        assert_eq!(value["type"], "MEDIA");
    }

    #[test]
    fn test_partial_node_uses_defaults() {
        let node: DesignNode = serde_json::from_value(json!({
            "id": "1:2",
            "type": "FRAME",
            "layoutMode": "GRID",
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }],
            "effects": [{ "type": "NOISE" }]
        }))
        .expect("node");

        assert!(node.visible);
        assert!(node.children.is_empty());
        assert_eq!(node.layout_mode, LayoutMode::Other);
        assert!(!node.has_auto_layout());
        assert_eq!(node.effects[0].effect_type, EffectType::Other);

        let fill = node.primary_fill().expect("fill");
        assert!(fill.visible);
        assert_eq!(fill.paint_type, PaintType::Solid);
        assert_eq!(fill.color.map(|c| c.a), Some(1.0));
        assert_eq!(fill.solid_css().as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_primary_fill_skips_hidden_paints() {
        let node = DesignNode {
            fills: vec![
                Paint {
                    visible: false,
                    ..Paint::solid(FigmaColor::rgb(1.0, 0.0, 0.0))
                },
                Paint::solid(FigmaColor::rgb(0.0, 0.0, 1.0)),
            ],
            ..DesignNode::default()
        };
        assert_eq!(
            node.primary_fill().and_then(Paint::solid_css).as_deref(),
            Some("#0000ff")
        );
    }

    #[test]
    fn test_nodes_response_tolerates_null_entries() {
        let response: FigmaNodesResponse = serde_json::from_value(json!({
            "name": "File",
            "nodes": { "1:2": null, "1:3": { "document": { "id": "1:3", "type": "TEXT" } } }
        }))
        .expect("nodes");
        assert!(response.nodes["1:2"].is_none());
        assert!(response.nodes["1:3"].is_some());
    }

    #[test]
    fn test_image_fills_response_parses_meta() {
        let fills: FigmaImageFills = serde_json::from_value(json!({
            "error": false,
            "status": 200,
            "meta": { "images": { "abc": "https://s3/abc" } }
        }))
        .expect("fills");
        assert_eq!(fills.meta.images["abc"], "https://s3/abc");
    }

    #[tokio::test]
    async fn download_image_propagates_request_error() {
        let client = FigmaClient::new("token").expect("client");

        let result = client
            .download_image("http://127.0.0.1:1/nonexistent")
            .await;

        assert!(
            matches!(result, Err(FigmaError::Request(_))),
            "expected request error, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn fetch_design_maps_request_error_to_network() {
        let client = FigmaClient::with_base_url(
            crate::figma::FigmaAuth::PersonalAccessToken("token".into()),
            "http://127.0.0.1:1/v1",
            std::time::Duration::from_secs(1),
        )
        .expect("client");

        let err = fetch_design(&client, "KEY", Some("1-2")).await.unwrap_err();
        assert!(matches!(err, crate::FigcoError::Network(_)));
    }
}
