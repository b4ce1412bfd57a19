use base64::{Engine, engine::general_purpose::URL_SAFE};
use mockito::Matcher;
use serde_json::json;

use spoviews::config::Config;
use spoviews::management;
use spoviews::spotify::SpotifyClient;
use spoviews::types::{Credential, TimeFrame};
use spoviews::ApiError;

const TOKEN: &str = "BQC-test-access-token";

// Helper function to build a config pointing at the mock server
fn test_config(server: &mockito::ServerGuard) -> Config {
    Config {
        client_id: Some("client-id".to_string()),
        client_secret: Some("client-secret".to_string()),
        return_url: Some("http://localhost/callback".to_string()),
        api_url: server.url(),
        token_url: format!("{}/api/token", server.url()),
    }
}

// Helper function to build a full audio-feature record for an id
fn feature_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "uri": format!("spotify:track:{}", id),
        "danceability": 0.5,
        "energy": 0.8,
        "key": 4,
        "loudness": -6.5,
        "mode": 1,
        "speechiness": 0.05,
        "acousticness": 0.1,
        "instrumentalness": 0.0,
        "liveness": 0.12,
        "valence": 0.4,
        "tempo": 120.0,
        "duration_ms": 210000,
        "time_signature": 4
    })
}

fn features_body(ids: &[String]) -> String {
    json!({
        "audio_features": ids.iter().map(|id| feature_json(id)).collect::<Vec<_>>()
    })
    .to_string()
}

fn artist_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "genres": [], "popularity": 50 })
}

fn saved_item_json(track_id: &str, name: &str) -> serde_json::Value {
    json!({
        "added_at": "2023-10-01T00:00:00Z",
        "track": { "id": track_id, "name": name, "uri": format!("spotify:track:{}", track_id), "artists": [] }
    })
}

#[tokio::test]
async fn test_audio_features_zero_ids_issue_no_request() {
    // no mocks registered: any request against the server would fail
    let server = mockito::Server::new_async().await;
    let client = SpotifyClient::new(test_config(&server));

    let features = client.get_audio_features(TOKEN, &[]).await.unwrap();

    assert!(features.is_empty());
}

#[tokio::test]
async fn test_audio_features_single_id() {
    let mut server = mockito::Server::new_async().await;

    let ids = vec!["t0".to_string()];
    let m = server
        .mock("GET", "/audio-features")
        .match_query(Matcher::UrlEncoded("ids".into(), "t0".into()))
        .with_status(200)
        .with_body(features_body(&ids))
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let features = client.get_audio_features(TOKEN, &ids).await.unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id, "t0");
    m.assert_async().await;
}

#[tokio::test]
async fn test_audio_features_exact_page_boundary() {
    let mut server = mockito::Server::new_async().await;

    // 100 ids fit in exactly one request
    let ids: Vec<String> = (0..100).map(|i| format!("t{}", i)).collect();
    let m = server
        .mock("GET", "/audio-features")
        .match_query(Matcher::UrlEncoded("ids".into(), ids.join(",")))
        .with_status(200)
        .with_body(features_body(&ids))
        .expect(1)
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let features = client.get_audio_features(TOKEN, &ids).await.unwrap();

    assert_eq!(features.len(), 100);
    m.assert_async().await;
}

#[tokio::test]
async fn test_audio_features_two_pages_for_101_ids() {
    let mut server = mockito::Server::new_async().await;

    let ids: Vec<String> = (0..101).map(|i| format!("t{}", i)).collect();
    let first: Vec<String> = ids[0..100].to_vec();
    let second: Vec<String> = ids[100..101].to_vec();

    let m1 = server
        .mock("GET", "/audio-features")
        .match_query(Matcher::UrlEncoded("ids".into(), first.join(",")))
        .with_status(200)
        .with_body(features_body(&first))
        .expect(1)
        .create_async()
        .await;
    let m2 = server
        .mock("GET", "/audio-features")
        .match_query(Matcher::UrlEncoded("ids".into(), second.join(",")))
        .with_status(200)
        .with_body(features_body(&second))
        .expect(1)
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let features = client.get_audio_features(TOKEN, &ids).await.unwrap();

    // concatenated result preserves the input order
    assert_eq!(features.len(), 101);
    let returned: Vec<&str> = features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(returned, ids.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    m1.assert_async().await;
    m2.assert_async().await;
}

#[tokio::test]
async fn test_audio_features_three_pages_for_250_ids() {
    let mut server = mockito::Server::new_async().await;

    let ids: Vec<String> = (0..250).map(|i| format!("t{}", i)).collect();
    let chunks: Vec<Vec<String>> = vec![
        ids[0..100].to_vec(),
        ids[100..200].to_vec(),
        ids[200..250].to_vec(),
    ];

    let mut mocks = Vec::new();
    for chunk in &chunks {
        let m = server
            .mock("GET", "/audio-features")
            .match_query(Matcher::UrlEncoded("ids".into(), chunk.join(",")))
            .with_status(200)
            .with_body(features_body(chunk))
            .expect(1)
            .create_async()
            .await;
        mocks.push(m);
    }

    let client = SpotifyClient::new(test_config(&server));
    let features = client.get_audio_features(TOKEN, &ids).await.unwrap();

    assert_eq!(features.len(), 250);
    let returned: Vec<&str> = features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(returned, ids.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    for m in mocks {
        m.assert_async().await;
    }
}

#[tokio::test]
async fn test_saved_tracks_returns_partial_results_on_midfetch_failure() {
    let mut server = mockito::Server::new_async().await;

    // page 1 of 3 succeeds and links to page 2
    let page1 = server
        .mock("GET", "/me/tracks")
        .match_query(Matcher::UrlEncoded("offset".into(), "0".into()))
        .with_status(200)
        .with_body(
            json!({
                "items": [saved_item_json("s1", "First"), saved_item_json("s2", "Second")],
                "next": format!("{}/me/tracks?limit=50&offset=2", server.url()),
                "total": 6
            })
            .to_string(),
        )
        .create_async()
        .await;

    // page 2 blows up
    let page2 = server
        .mock("GET", "/me/tracks")
        .match_query(Matcher::UrlEncoded("offset".into(), "2".into()))
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let tracks = client.get_saved_tracks(TOKEN).await.unwrap();

    // the accumulated page-1 items come back as a success
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id, "s1");
    assert_eq!(tracks[1].id, "s2");
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_saved_tracks_follows_cursor_to_the_reported_total() {
    let mut server = mockito::Server::new_async().await;

    let page1 = server
        .mock("GET", "/me/tracks")
        .match_query(Matcher::UrlEncoded("offset".into(), "0".into()))
        .with_status(200)
        .with_body(
            json!({
                "items": [saved_item_json("s1", "First"), saved_item_json("s2", "Second")],
                "next": format!("{}/me/tracks?limit=50&offset=2", server.url()),
                "total": 3
            })
            .to_string(),
        )
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/me/tracks")
        .match_query(Matcher::UrlEncoded("offset".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({
                "items": [saved_item_json("s3", "Third")],
                "next": null,
                "total": 3
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let tracks = client.get_saved_tracks(TOKEN).await.unwrap();

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[2].id, "s3");
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_surfaces_as_token_expired() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":{"status":401,"message":"The access token expired"}}"#)
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let err = client
        .get_top_artists(TOKEN, TimeFrame::ShortTerm)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::TokenExpired));
    m.assert_async().await;
}

#[tokio::test]
async fn test_top_tracks_unwrap_the_items_envelope() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("GET", "/me/top/tracks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("time_range".into(), "long_term".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    { "id": "t1", "name": "One", "uri": "spotify:track:t1",
                      "artists": [artist_json("a1", "Alpha")] },
                    { "id": "t2", "name": "Two", "uri": "spotify:track:t2", "artists": [] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let tracks = client
        .get_top_tracks(TOKEN, TimeFrame::LongTerm, 10)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artists[0].name, "Alpha");
    m.assert_async().await;
}

#[tokio::test]
async fn test_user_profile() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("GET", "/me")
        .with_status(200)
        .with_body(json!({ "id": "user-1", "email": "user@example.com" }).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let user = client.get_user_profile(TOKEN).await.unwrap();

    assert_eq!(user.id, "user-1");
    assert_eq!(user.email, "user@example.com");
    m.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_retries_are_bounded() {
    let mut server = mockito::Server::new_async().await;

    // the initial request plus three permitted retries
    let m = server
        .mock("GET", "/me")
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(4)
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let err = client.get_user_profile(TOKEN).await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimited { attempts: 4 }));
    m.assert_async().await;
}

#[tokio::test]
async fn test_other_statuses_surface_as_bad_request() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("GET", "/me")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let err = client.get_user_profile(TOKEN).await.unwrap_err();

    match err {
        ApiError::BadRequest { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
    m.assert_async().await;
}

#[tokio::test]
async fn test_missing_access_token_fails_before_any_request() {
    let server = mockito::Server::new_async().await;
    let client = SpotifyClient::new(test_config(&server));

    let err = client.get_user_profile("").await.unwrap_err();

    assert!(matches!(err, ApiError::MissingCredential("access token")));
}

#[tokio::test]
async fn test_exchange_code_returns_both_tokens() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("POST", "/api/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "auth-code".into()),
            Matcher::UrlEncoded("client_id".into(), "client-id".into()),
            Matcher::UrlEncoded("client_secret".into(), "client-secret".into()),
            Matcher::UrlEncoded("redirect_uri".into(), "http://localhost/callback".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "access_token": "fresh-access",
                "token_type": "Bearer",
                "scope": "user-top-read",
                "expires_in": 3600,
                "refresh_token": "fresh-refresh"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let credential = client.exchange_code("auth-code").await.unwrap();

    assert_eq!(credential.access_token, "fresh-access");
    assert_eq!(credential.refresh_token, "fresh-refresh");
    m.assert_async().await;
}

#[tokio::test]
async fn test_exchange_code_requires_configuration() {
    let server = mockito::Server::new_async().await;
    let mut config = test_config(&server);
    config.return_url = None;

    let client = SpotifyClient::new(config);
    let err = client.exchange_code("auth-code").await.unwrap_err();

    assert!(matches!(err, ApiError::MissingCredential("return url")));
}

#[tokio::test]
async fn test_refresh_requires_client_secret() {
    let server = mockito::Server::new_async().await;
    let mut config = test_config(&server);
    config.client_secret = None;

    let credential = Credential {
        access_token: "old-access".to_string(),
        refresh_token: "keep-me".to_string(),
    };

    let client = SpotifyClient::new(config);
    let err = client.refresh(&credential).await.unwrap_err();

    assert!(matches!(err, ApiError::MissingCredential("client secret")));
    // the existing credential is untouched
    assert_eq!(credential.access_token, "old-access");
    assert_eq!(credential.refresh_token, "keep-me");
}

#[tokio::test]
async fn test_refresh_replaces_only_the_access_token() {
    let mut server = mockito::Server::new_async().await;

    let basic = format!("Basic {}", URL_SAFE.encode("client-id:client-secret"));
    let m = server
        .mock("POST", "/api/token")
        .match_header("authorization", basic.as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "keep-me".into()),
        ]))
        .with_status(200)
        // refresh responses carry no refresh token
        .with_body(json!({ "access_token": "new-access" }).to_string())
        .create_async()
        .await;

    let credential = Credential {
        access_token: "old-access".to_string(),
        refresh_token: "keep-me".to_string(),
    };

    let client = SpotifyClient::new(test_config(&server));
    let refreshed = client.refresh(&credential).await.unwrap();

    assert_eq!(refreshed.access_token, "new-access");
    assert_eq!(refreshed.refresh_token, "keep-me");
    m.assert_async().await;
}

#[tokio::test]
async fn test_refresh_with_undecodable_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_body("definitely not json")
        .create_async()
        .await;

    let credential = Credential {
        access_token: "old-access".to_string(),
        refresh_token: "keep-me".to_string(),
    };

    let client = SpotifyClient::new(test_config(&server));
    let err = client.refresh(&credential).await.unwrap_err();

    assert!(matches!(err, ApiError::MalformedResponse(_)));
    m.assert_async().await;
}

#[tokio::test]
async fn test_aggregate_happy_path() {
    let mut server = mockito::Server::new_async().await;

    // three time frames of top artists; alpha shows up twice
    let short = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded("time_range".into(), "short_term".into()))
        .with_status(200)
        .with_body(json!({ "items": [artist_json("a1", "Alpha")] }).to_string())
        .create_async()
        .await;
    let medium = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded(
            "time_range".into(),
            "medium_term".into(),
        ))
        .with_status(200)
        .with_body(json!({ "items": [artist_json("b1", "Beta")] }).to_string())
        .create_async()
        .await;
    let long = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded("time_range".into(), "long_term".into()))
        .with_status(200)
        .with_body(json!({ "items": [artist_json("a1", "Alpha")] }).to_string())
        .create_async()
        .await;

    // related artists: one call per candidate appearance
    let related_a = server
        .mock("GET", "/artists/a1/related-artists")
        .with_status(200)
        .with_body(
            json!({ "artists": [artist_json("g1", "Gamma"), artist_json("d1", "Delta")] })
                .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let related_b = server
        .mock("GET", "/artists/b1/related-artists")
        .with_status(200)
        .with_body(json!({ "artists": [artist_json("g1", "Gamma")] }).to_string())
        .expect(1)
        .create_async()
        .await;

    let recommendations = server
        .mock("GET", "/recommendations")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "tracks": [
                    { "id": "rt1", "name": "Recommended", "uri": "spotify:track:rt1",
                      "artists": [artist_json("g1", "Gamma")] }
                ],
                "seeds": [
                    { "id": "g1", "href": "https://api.spotify.com/v1/artists/g1", "type": "artist" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let recs = management::aggregate(&client, TOKEN).await.unwrap();

    assert_eq!(recs.tracks.len(), 1);
    assert_eq!(recs.tracks[0].id, "rt1");
    assert_eq!(recs.seeds.len(), 1);
    assert_eq!(recs.seeds[0].kind, "artist");

    short.assert_async().await;
    medium.assert_async().await;
    long.assert_async().await;
    related_a.assert_async().await;
    related_b.assert_async().await;
    recommendations.assert_async().await;
}

#[tokio::test]
async fn test_aggregate_aborts_when_a_related_fetch_fails() {
    let mut server = mockito::Server::new_async().await;

    let _short = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded("time_range".into(), "short_term".into()))
        .with_status(200)
        .with_body(json!({ "items": [artist_json("a1", "Alpha")] }).to_string())
        .create_async()
        .await;
    let _medium = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded(
            "time_range".into(),
            "medium_term".into(),
        ))
        .with_status(200)
        .with_body(json!({ "items": [] }).to_string())
        .create_async()
        .await;
    let _long = server
        .mock("GET", "/me/top/artists")
        .match_query(Matcher::UrlEncoded("time_range".into(), "long_term".into()))
        .with_status(200)
        .with_body(json!({ "items": [] }).to_string())
        .create_async()
        .await;

    let related = server
        .mock("GET", "/artists/a1/related-artists")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let client = SpotifyClient::new(test_config(&server));
    let err = management::aggregate(&client, TOKEN).await.unwrap_err();

    // the error propagates unchanged and no partial result is produced
    assert!(matches!(err, ApiError::BadRequest { status: 502, .. }));
    related.assert_async().await;
}
