//! Shot planning.
//!
//! Pure computation: a song structure expands into an ordered list of
//! timed shots with resolved prompts. If the structure's planned
//! duration undershoots the target song duration, the whole expanded
//! list loops enough whole times to cover it, then truncates by clip
//! count. Truncation-by-count can over- or undershoot the target by up
//! to one clip's length; that policy is intentional.

use songvid_models::{default_structure, prompt_template, Section, Shot, ShotPlan, SongSpec};

/// Expand a song spec into its ordered shot list and total planned
/// duration. Pure; identical inputs always yield an identical plan.
pub fn plan_shots(spec: &SongSpec) -> ShotPlan {
    let structure = match &spec.structure {
        Some(sections) if !sections.is_empty() => sections.clone(),
        _ => default_structure(),
    };

    let expanded = expand_structure(&structure);
    let lyrics_blocks = split_lyrics_blocks(spec.lyrics.as_deref());

    let mut cumulative = 0.0;
    let mut shots = Vec::with_capacity(expanded.len());
    for (idx, section) in expanded.iter().enumerate() {
        let duration_sec = section.duration_sec.unwrap_or(spec.clip_duration_sec);
        let prompt = section.prompt.clone().unwrap_or_else(|| {
            resolve_prompt(&section.key, &spec.base_style, &spec.extra_style)
        });
        let label = section
            .label
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| {
                if section.key.is_empty() {
                    format!("section_{}", idx + 1)
                } else {
                    section.key.clone()
                }
            });

        shots.push(Shot {
            id: (idx + 1) as u32,
            label,
            prompt,
            duration_sec,
            start_sec: cumulative,
            lyrics_excerpt: lyrics_blocks
                .as_ref()
                .map(|blocks| blocks[idx % blocks.len()].clone()),
            loop_index: 1,
        });

        cumulative += duration_sec;
    }

    let planned: f64 = shots.iter().map(|shot| shot.duration_sec).sum();

    // Loop the whole pass to cover the song, unless the plan is empty
    // or zero-length (no looping, no division).
    if planned > 0.0 && planned < spec.song_duration_sec {
        let passes = (spec.song_duration_sec / planned).ceil() as usize;
        let mut looped = Vec::with_capacity(passes * shots.len());
        let mut cursor = 0.0;
        for pass in 0..passes {
            for shot in &shots {
                let mut clone = shot.clone();
                clone.loop_index = (pass + 1) as u32;
                clone.start_sec = cursor;
                cursor += clone.duration_sec;
                looped.push(clone);
            }
        }

        let keep = (spec.song_duration_sec / spec.clip_duration_sec).ceil() as usize;
        looped.truncate(keep);

        let planned_duration_sec = looped.iter().map(|shot| shot.duration_sec).sum();
        return ShotPlan {
            shots: looped,
            planned_duration_sec,
        };
    }

    ShotPlan {
        shots,
        planned_duration_sec: planned,
    }
}

/// Expand `repeat` sections into consecutive instances.
fn expand_structure(structure: &[Section]) -> Vec<Section> {
    structure
        .iter()
        .flat_map(|section| {
            std::iter::repeat_with(|| section.clone()).take(section.repeat_count() as usize)
        })
        .collect()
}

fn resolve_prompt(key: &str, base_style: &str, extra_style: &[String]) -> String {
    let additive = if extra_style.is_empty() {
        String::new()
    } else {
        format!(", {}", extra_style.join(", "))
    };
    format!("{}, {}{}", prompt_template(key), base_style, additive)
}

/// Split lyrics on blank lines into trimmed blocks. Returns `None`
/// when no lyrics were supplied or no non-blank content remains.
fn split_lyrics_blocks(lyrics: Option<&str>) -> Option<Vec<String>> {
    let lyrics = lyrics?;

    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in lyrics.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    if blocks.is_empty() {
        None
    } else {
        Some(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with(structure: Vec<Section>, song_duration_sec: f64) -> SongSpec {
        SongSpec {
            structure: Some(structure),
            song_duration_sec,
            ..SongSpec::default()
        }
    }

    #[test]
    fn test_repeat_expansion_count() {
        let spec = spec_with(
            vec![
                Section::new("intro", 5.0),
                Section::new("verse", 10.0).with_repeat(3),
                Section::new("chorus", 8.0).with_repeat(0),
            ],
            // Large enough to cover: 5 + 30 + 8 = 43 >= 43
            43.0,
        );

        let plan = plan_shots(&spec);
        assert_eq!(plan.len(), 1 + 3 + 1);
    }

    #[test]
    fn test_start_sec_is_prefix_sum() {
        let spec = spec_with(
            vec![
                Section::new("intro", 5.0),
                Section::new("verse", 10.0).with_repeat(2),
                Section::new("outro", 6.0),
            ],
            31.0,
        );

        let plan = plan_shots(&spec);
        let mut expected = 0.0;
        for shot in &plan.shots {
            assert_eq!(shot.start_sec, expected);
            expected += shot.duration_sec;
        }
        assert_eq!(plan.planned_duration_sec, expected);
    }

    #[test]
    fn test_looping_truncates_by_clip_count() {
        // One 5s section, 30s song, 6s clips: 6 passes planned, kept to
        // ceil(30 / 6) = 5 shots.
        let spec = spec_with(vec![Section::new("intro", 5.0)], 30.0);

        let plan = plan_shots(&spec);
        assert_eq!(plan.len(), 5);

        let mut prev = -1.0;
        for (i, shot) in plan.shots.iter().enumerate() {
            assert!(shot.start_sec > prev, "start_sec not strictly increasing");
            prev = shot.start_sec;
            assert_eq!(shot.loop_index, (i + 1) as u32);
        }
        assert_eq!(plan.planned_duration_sec, 25.0);
    }

    #[test]
    fn test_planner_is_idempotent() {
        let spec = SongSpec {
            lyrics: Some("line one\n\nline two".to_string()),
            ..SongSpec::default()
        };
        let first = plan_shots(&spec);
        let second = plan_shots(&spec);
        assert_eq!(first.shots, second.shots);
        assert_eq!(first.planned_duration_sec, second.planned_duration_sec);
    }

    #[test]
    fn test_single_section_exact_duration() {
        // Scenario: one 5s intro covering a 5s song exactly.
        let spec = spec_with(vec![Section::new("intro", 5.0)], 5.0);

        let plan = plan_shots(&spec);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.shots[0].start_sec, 0.0);
        assert_eq!(plan.shots[0].duration_sec, 5.0);
        assert_eq!(plan.shots[0].loop_index, 1);
        assert_eq!(plan.planned_duration_sec, 5.0);
    }

    #[test]
    fn test_repeated_section_overshooting_target() {
        // Scenario: verse x2 at 10s each against a 10s target; the plan
        // already covers the song, so no looping happens.
        let spec = spec_with(vec![Section::new("verse", 10.0).with_repeat(2)], 10.0);

        let plan = plan_shots(&spec);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.shots[0].label, "verse");
        assert_eq!(plan.shots[1].label, "verse");
        assert_eq!(plan.shots[0].start_sec, 0.0);
        assert_eq!(plan.shots[1].start_sec, 10.0);
        assert_eq!(plan.planned_duration_sec, 20.0);
    }

    #[test]
    fn test_zero_length_plan_does_not_loop() {
        let spec = spec_with(
            vec![
                Section {
                    key: "intro".to_string(),
                    duration_sec: Some(0.0),
                    repeat: None,
                    prompt: None,
                    label: None,
                },
                Section {
                    key: "outro".to_string(),
                    duration_sec: Some(0.0),
                    repeat: None,
                    prompt: None,
                    label: None,
                },
            ],
            60.0,
        );

        let plan = plan_shots(&spec);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.planned_duration_sec, 0.0);
    }

    #[test]
    fn test_literal_prompt_used_verbatim() {
        let mut section = Section::new("verse", 10.0);
        section.prompt = Some("hand-written prompt".to_string());
        let spec = spec_with(vec![section], 10.0);

        let plan = plan_shots(&spec);
        assert_eq!(plan.shots[0].prompt, "hand-written prompt");
    }

    #[test]
    fn test_templated_prompt_includes_styles() {
        let spec = SongSpec {
            structure: Some(vec![Section::new("chorus", 8.0)]),
            song_duration_sec: 8.0,
            extra_style: vec!["neon".to_string(), "rain".to_string()],
            ..SongSpec::default()
        };

        let plan = plan_shots(&spec);
        let prompt = &plan.shots[0].prompt;
        assert!(prompt.starts_with("chorus scene"));
        assert!(prompt.contains(&spec.base_style));
        assert!(prompt.ends_with(", neon, rain"));
    }

    #[test]
    fn test_lyrics_blocks_cycle_over_sections() {
        let spec = SongSpec {
            lyrics: Some("first block\n\nsecond block".to_string()),
            structure: Some(vec![
                Section::new("intro", 5.0),
                Section::new("verse", 5.0),
                Section::new("chorus", 5.0),
            ]),
            song_duration_sec: 15.0,
            ..SongSpec::default()
        };

        let plan = plan_shots(&spec);
        let excerpts: Vec<_> = plan
            .shots
            .iter()
            .map(|s| s.lyrics_excerpt.as_deref().unwrap())
            .collect();
        assert_eq!(excerpts, ["first block", "second block", "first block"]);
    }

    #[test]
    fn test_no_lyrics_means_no_excerpts() {
        let spec = spec_with(vec![Section::new("intro", 5.0)], 5.0);
        let plan = plan_shots(&spec);
        assert!(plan.shots[0].lyrics_excerpt.is_none());
    }

    #[test]
    fn test_default_structure_used_when_absent() {
        let spec = SongSpec {
            song_duration_sec: 75.0,
            ..SongSpec::default()
        };

        let plan = plan_shots(&spec);
        // intro + verse x2 + chorus + verse x2 + bridge + chorus + outro
        assert_eq!(plan.len(), 9);
        assert_eq!(plan.planned_duration_sec, 75.0);
    }
}
