use anyhow::Result;
use assignment_assessor::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（默认值 → assessor.toml → 环境变量）
    let config = Config::load()?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
