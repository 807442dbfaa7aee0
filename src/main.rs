use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use optiroute_client::services::Services;
use optiroute_client::utils::formatters;
use optiroute_client::{ApiClient, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚌 OptiRoute - Cliente de rutas de empleados");
    info!("============================================");

    let config = ClientConfig::from_env().context("Configuración inválida")?;
    info!("🌐 API: {}", config.api_url);

    let client = ApiClient::from_config(&config)?;
    let services = Services::new(client);

    if env::args().nth(1).as_deref() == Some("logout") {
        services.auth.logout()?;
        info!("👋 Sesión cerrada");
        return Ok(());
    }

    if !services.auth.is_authenticated() {
        let email = env::var("OPTIROUTE_EMAIL").context("OPTIROUTE_EMAIL no definido y no hay sesión guardada")?;
        let password = env::var("OPTIROUTE_PASSWORD").context("OPTIROUTE_PASSWORD no definido")?;

        match services.auth.login_user(&email, &password).await {
            Ok(user) => info!("✅ Sesión iniciada como {} ({})", user.full_name(), user.role.label()),
            Err(e) => {
                error!("❌ Error de autenticación: {}", e);
                return Err(anyhow::anyhow!("Login fallido: {}", e.message()));
            }
        }
    }

    let stats = services
        .dashboard
        .get_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Error cargando el dashboard: {}", e.message()))?;

    let overview = &stats.overview;
    println!("📊 Resumen");
    println!("  Empleados activos:    {}/{}", overview.active_employees, overview.total_employees);
    println!("  Vehículos disponibles: {}/{}", overview.available_vehicles, overview.total_vehicles);
    println!("  Rutas activas:        {}/{}", overview.active_routes, overview.total_routes);
    println!("  Utilización:          {}", formatters::percentage(overview.utilization_rate));
    println!("  Ahorro mensual:       {}", formatters::currency(stats.savings.monthly));

    for item in stats.recent_activity.iter().take(5) {
        println!("  • [{}] {}", item.kind_label(), item.title);
    }

    Ok(())
}
