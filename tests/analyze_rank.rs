// tests/analyze_rank.rs
use ai_news_digest::analyze::{
    aggregate, default_categories, enrich, hot_score, rank, score_classify_rank, CategorySpec,
    Classifier, DEFAULT_CATEGORY,
};
use ai_news_digest::{Article, EngagementMetrics, Published};

fn article(id: &str, title: &str, body: &str) -> Article {
    Article {
        id: id.into(),
        title: title.into(),
        body: body.into(),
        title_localized: None,
        body_localized: None,
        source: "Fixture".into(),
        author: "Fixture".into(),
        feed_category: String::new(),
        published: Published::Raw(String::new()),
        url: format!("https://fixture.test/{id}"),
        metrics: EngagementMetrics::default(),
        category: None,
        confidence: 0.0,
        hot_score: 0.0,
        hashtags: vec![],
        mentions: vec![],
        urls: vec![],
    }
}

fn with_metrics(mut a: Article, likes: u64, retweets: u64, replies: u64) -> Article {
    a.metrics = EngagementMetrics {
        likes,
        retweets,
        replies,
        impressions: None,
    };
    a
}

fn clf() -> Classifier {
    Classifier::new(default_categories(), DEFAULT_CATEGORY).unwrap()
}

#[test]
fn engagement_example() {
    let m = EngagementMetrics {
        likes: 10,
        retweets: 5,
        replies: 2,
        impressions: None,
    };
    assert_eq!(hot_score(&m), 23.0);

    let zero_views = EngagementMetrics {
        impressions: Some(0),
        ..m
    };
    assert_eq!(hot_score(&zero_views), 23.0);

    let views = EngagementMetrics {
        impressions: Some(1_000),
        ..m
    };
    assert!((hot_score(&views) - 24.0).abs() < 1e-9);
}

#[test]
fn ranking_is_non_increasing_and_stable() {
    let mut v = vec![
        with_metrics(article("a", "A", ""), 15, 0, 0),
        with_metrics(article("b", "B", ""), 15, 0, 0),
        with_metrics(article("c", "C", ""), 0, 0, 0),
        with_metrics(article("d", "D", ""), 0, 20, 0),
    ];
    for a in v.iter_mut() {
        a.hot_score = hot_score(&a.metrics);
    }
    rank(&mut v);

    let ids: Vec<&str> = v.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "a", "b", "c"]);
    assert!(v.windows(2).all(|w| w[0].hot_score >= w[1].hot_score));
}

#[test]
fn category_examples() {
    let c = clf();
    let gpt = c.classify("New GPT model released with breakthrough performance");
    assert_eq!(gpt.category, "大模型");
    assert!((gpt.confidence - 2.0 / 13.0).abs() < 1e-9);

    let sd = c.classify("Stable Diffusion 3.0 brings better image quality");
    assert_eq!(sd.category, "AI 绘画");
    assert!((sd.confidence - 0.2).abs() < 1e-9);

    let none = c.classify("Weather is sunny today");
    assert_eq!(none.category, DEFAULT_CATEGORY);
    assert_eq!(none.confidence, 0.0);
}

#[test]
fn duplicated_keyword_counts_twice() {
    // 行业新闻 lists 发布 twice: one occurrence scores 2 and beats a single 大模型 hit.
    let c = clf().classify("GPT 新版本发布");
    assert_eq!(c.category, "行业新闻");
    assert!((c.confidence - 4.0 / 12.0).abs() < 1e-9);
}

#[test]
fn confidence_is_capped_at_one() {
    let c = Classifier::new(vec![CategorySpec::new("x", &["alpha", "beta"])], "other").unwrap();
    let r = c.classify("alpha beta");
    assert_eq!(r.category, "x");
    assert_eq!(r.confidence, 1.0);
}

#[test]
fn classifier_rejects_bad_tables() {
    assert!(Classifier::new(vec![], DEFAULT_CATEGORY).is_err());
    assert!(Classifier::new(
        vec![CategorySpec::new("a", &["x"]), CategorySpec::new("a", &["y"])],
        DEFAULT_CATEGORY
    )
    .is_err());
    assert!(Classifier::new(vec![CategorySpec::new(DEFAULT_CATEGORY, &["x"])], DEFAULT_CATEGORY).is_err());
}

#[test]
fn enrich_extracts_entities_from_title_and_body() {
    let mut a = article(
        "x",
        "#GPT5 is out",
        "Thanks @sama, more at https://openai.com/blog and http://x.test/a?b=1",
    );
    enrich(&mut a, &clf());

    assert_eq!(a.hashtags, vec!["GPT5"]);
    assert_eq!(a.mentions, vec!["sama"]);
    assert_eq!(a.urls, vec!["https://openai.com/blog", "http://x.test/a?b=1"]);
    assert_eq!(a.category.as_deref(), Some("大模型"));
}

#[test]
fn every_article_gets_a_category_from_the_closed_set() {
    let c = clf();
    let labels: Vec<String> = c.labels().into_iter().map(String::from).collect();
    let out = score_classify_rank(
        vec![
            article("1", "Claude learns to code", ""),
            article("2", "Midjourney v7", ""),
            article("3", "Robotics lab opens", ""),
        ],
        &c,
    );
    for a in &out {
        let cat = a.category.as_deref().unwrap();
        assert!(labels.iter().any(|l| l == cat), "unexpected {cat}");
        assert_eq!(a.confidence == 0.0, cat == DEFAULT_CATEGORY);
    }
}

#[test]
fn aggregate_empty_and_mean() {
    let s = aggregate(&[]);
    assert_eq!(s.total, 0);
    assert_eq!(s.avg_hot_score, 0.0);
    assert!(s.category_distribution.is_empty());

    let out = score_classify_rank(
        vec![
            with_metrics(article("a", "GPT news", ""), 10, 0, 0),
            with_metrics(article("b", "Claude news", ""), 0, 1, 0),
            with_metrics(article("c", "Sunny day", ""), 0, 0, 2),
        ],
        &clf(),
    );
    let s = aggregate(&out);
    assert_eq!(s.total, 3);
    assert_eq!(s.total_hot_score, 15.0);
    assert_eq!(s.avg_hot_score, 5.0);
    assert_eq!(s.category_distribution.get("大模型"), Some(&2));
    assert_eq!(s.category_distribution.get(DEFAULT_CATEGORY), Some(&1));
    assert_eq!(s.category_distribution.values().sum::<usize>(), s.total);
    assert!(!s.category_distribution.contains_key("AI 绘画"));
}
