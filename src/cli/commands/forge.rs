use crate::config::Config;
use crate::db::Store;
use crate::models::article::NewArticle;

/// Display name given to the administrator row by `forge`.
pub const OWNER_NAME: &str = "李黑皮";

/// `(title, content, author)`
pub const SAMPLE_ARTICLES: [(&str, &str, &str); 4] = [
    ("python基础", "hello1", "作者one"),
    ("python入门", "hello2", "作者two"),
    ("python初级", "hello3", "作者there"),
    ("python高级", "hello4", "作者four"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForgeReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Seeds the owner name and the sample articles. Articles whose title is
/// already present are left alone, so running it twice is harmless.
pub async fn forge(store: &Store) -> anyhow::Result<ForgeReport> {
    store.set_admin_name(OWNER_NAME).await?;

    let mut report = ForgeReport {
        inserted: 0,
        skipped: 0,
    };

    for (title, content, author) in SAMPLE_ARTICLES {
        if store
            .insert_article_if_absent(NewArticle::new(title, content, author))
            .await?
        {
            report.inserted += 1;
        } else {
            report.skipped += 1;
        }
    }

    Ok(report)
}

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let report = forge(&store).await?;

    if report.skipped > 0 {
        println!("Skipped {} articles that already exist.", report.skipped);
    }
    println!("Inserted {} articles.", report.inserted);
    println!("Done.");
    Ok(())
}
