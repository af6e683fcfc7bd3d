//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 配置 → 渲染循环 → sink 的端到端测试
//! - 数字时间、日期与指针角度的一致性测试

#[cfg(test)]
mod contract_tests {
    use contracts::{ClockConfig, ConfigVersion, DisplayState};

    #[test]
    fn test_config_version_defaults_to_v1() {
        let config: ClockConfig =
            serde_json::from_str(r#"{"clock": {"timezone": "Asia/Tokyo"}}"#).unwrap();
        assert_eq!(config.version, ConfigVersion::V1);
        assert_eq!(config.clock.timezone, "Asia/Tokyo");
        assert_eq!(serde_json::to_value(config.version).unwrap(), "V1");

        // 未知版本必须拒绝
        assert!(serde_json::from_str::<ClockConfig>(r#"{"version": "V2"}"#).is_err());
    }

    #[test]
    fn test_display_state_json_shape() {
        let state = DisplayState {
            frame_id: 3,
            zone: "UTC".into(),
            digital_text: "00:05:09".into(),
            date_text: "2024年3月15日星期五".into(),
            second_angle_deg: 54.0,
            minute_angle_deg: 30.9,
            hour_angle_deg: 2.5,
        };
        let json = serde_json::to_value(&state).unwrap();
        for key in [
            "frame_id",
            "zone",
            "digital_text",
            "date_text",
            "second_angle_deg",
            "minute_angle_deg",
            "hour_angle_deg",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_default_config_round_trips() {
        let config = ClockConfig::default();
        let toml = config_loader::ConfigLoader::to_toml(&config).unwrap();
        let back =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(back.sinks.len(), 1);
        assert!(back.clock.use_24h);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ClockSettings, DisplayState, HourFormat};
    use render_loop::{
        create_render_loop, MemorySink, RenderLoopBuilder, RenderLoopConfig,
    };
    use time_resolver::{ManualInstantSource, TimeResolver, ZoneRule};
    use tokio::sync::watch;

    fn resolver() -> TimeResolver {
        TimeResolver::with_local(ZoneRule::SystemLocal)
    }

    /// End-to-end test: TOML config -> RenderLoop -> FileSink + LogSink
    #[tokio::test(start_paused = true)]
    async fn test_e2e_config_to_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");
        let content = format!(
            r#"
[clock]
timezone = "Asia/Kathmandu"
use_24h = true
frame_rate_hz = 20.0

[[sinks]]
name = "frames"
sink_type = "file"
[sinks.params]
path = "{}"

[[sinks]]
name = "trace"
sink_type = "log"
[sinks.params]
every = "5"
"#,
            path.display().to_string().replace('\\', "/")
        );

        let config = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();
        let (_tx, rx) = watch::channel(config.settings());
        let source = Arc::new(ManualInstantSource::new(
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
        ));

        let render_loop =
            create_render_loop(&config, rx, resolver(), source, Some(10)).unwrap();
        let report = render_loop.spawn().join().await.unwrap();

        assert_eq!(report.frames_rendered, 10);
        assert_eq!(report.sinks.len(), 2);
        assert!(report.sinks.iter().all(|(_, m)| m.render_count == 10));

        let written = std::fs::read_to_string(&path).unwrap();
        let states: Vec<DisplayState> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(states.len(), 10);
        // Kathmandu is UTC+05:45
        assert!(states.iter().all(|s| s.digital_text == "05:45:00"));
        assert_eq!(states[0].zone, "Asia/Kathmandu");
        assert_eq!(states[9].frame_id, 9);
    }

    /// Cancellation while settings change underneath the loop
    #[tokio::test(start_paused = true)]
    async fn test_e2e_settings_then_cancel() {
        let (tx, rx) = watch::channel(ClockSettings::new("America/New_York", true));
        let sink = MemorySink::new("memory");
        let frames = sink.frames();
        let source = Arc::new(ManualInstantSource::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap(),
        ));

        let handle = RenderLoopBuilder::new(rx)
            .resolver(resolver())
            .instant_source(source.clone())
            .config(RenderLoopConfig {
                frame_interval: Duration::from_millis(16),
                max_frames: None,
            })
            .sink(sink)
            .build()
            .unwrap()
            .spawn();

        tokio::time::sleep(Duration::from_millis(40)).await;
        // January: UTC-5
        assert_eq!(
            MemorySink::snapshot(&frames).last().unwrap().digital_text,
            "12:30:00"
        );

        source.set(Utc.with_ymd_and_hms(2024, 7, 15, 17, 30, 0).unwrap());
        tx.send_replace(ClockSettings {
            timezone: "America/New_York".into(),
            hour_format: HourFormat::Twelve,
        });
        tokio::time::sleep(Duration::from_millis(40)).await;
        // July: UTC-4
        assert_eq!(
            MemorySink::snapshot(&frames).last().unwrap().digital_text,
            "01:30:00 PM"
        );

        handle.cancel();
        let pushed = MemorySink::snapshot(&frames).len();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(MemorySink::snapshot(&frames).len(), pushed);

        handle.cancel();
        let report = handle.join().await.unwrap();
        assert_eq!(report.frames_rendered as usize, pushed);
    }

    /// Empty selection renders the observer's zone and never stops the loop
    #[tokio::test(start_paused = true)]
    async fn test_e2e_blank_timezone_uses_local() {
        let (_tx, rx) = watch::channel(ClockSettings::new("", true));
        let sink = MemorySink::new("memory");
        let frames = sink.frames();
        let instant = Utc.with_ymd_and_hms(2024, 3, 15, 6, 7, 8).unwrap();

        let handle = RenderLoopBuilder::new(rx)
            .resolver(TimeResolver::with_local(ZoneRule::Named(chrono_tz::Asia::Tokyo)))
            .instant_source(Arc::new(ManualInstantSource::new(instant)))
            .config(RenderLoopConfig {
                frame_interval: Duration::from_millis(16),
                max_frames: Some(3),
            })
            .sink(sink)
            .build()
            .unwrap()
            .spawn();

        let report = handle.join().await.unwrap();
        assert_eq!(report.summary.fallback_frames, 3);
        let states = MemorySink::snapshot(&frames);
        assert!(states
            .iter()
            .all(|s| s.zone == "Asia/Tokyo" && s.digital_text == "15:07:08"));
    }
}

#[cfg(test)]
mod consistency_tests {
    use chrono::{Duration, Locale, TimeZone, Timelike, Utc};
    use contracts::{normalize_degrees, HourFormat};
    use render_loop::compose;
    use time_resolver::{TimeResolver, ZoneRule};

    const ZONES: [&str; 6] = [
        "Asia/Tokyo",
        "America/Los_Angeles",
        "Europe/London",
        "Asia/Kathmandu",
        "Pacific/Chatham",
        "UTC",
    ];

    /// Digital time, date and hands all describe the same zone-local reading
    #[test]
    fn test_text_date_and_hands_agree() {
        let resolver = TimeResolver::with_local(ZoneRule::SystemLocal);
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();

        for step in 0..200 {
            let instant = start + Duration::minutes(37 * step) + Duration::milliseconds(250);
            for zone in ZONES {
                let tz: chrono_tz::Tz = zone.parse().unwrap();
                let expected = instant.with_timezone(&tz);

                let fields = resolver.resolve(instant, zone);
                let state = compose(&fields, HourFormat::TwentyFour, step as u64);

                assert_eq!(
                    state.digital_text,
                    expected.format("%H:%M:%S").to_string(),
                    "{zone} at {instant}"
                );
                assert_eq!(
                    state.date_text,
                    expected
                        .format_localized("%Y年%-m月%-d日%A", Locale::zh_CN)
                        .to_string(),
                    "{zone} at {instant}"
                );

                let hour = f64::from(expected.hour() % 12) + f64::from(expected.minute()) / 60.0;
                assert!((normalize_degrees(state.hour_angle_deg) - hour * 30.0).abs() < 1e-9);
                assert!((fields.fractional_second - 0.25).abs() < 1e-9);
            }
        }
    }
}
