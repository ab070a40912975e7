use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use lavadero_backend::config::EnvironmentConfig;
use lavadero_backend::database::DatabaseConnection;
use lavadero_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚿 Lavadero - API de punto de venta y fidelización");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(e.into());
        }
    };

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;

    let addr: SocketAddr = config.server_url().parse()?;
    info!("⚙️ Entorno: {} | desfase horario: UTC{:+}", config.environment, config.utc_offset_hours);

    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptará cualquier origen");
    }

    let app = lavadero_backend::create_app(AppState::new(db_connection.pool().clone(), config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   POST /api/auth/login - Login");
    info!("👤 Usuarios y puntos:");
    info!("   GET|POST /api/usuarios, GET|PUT|DELETE /api/usuarios/:id");
    info!("   GET  /api/usuarios/lavadores, POST /api/usuarios/:id/liquidar-comision");
    info!("   GET|POST /api/puntos, GET|PUT /api/puntos/:id");
    info!("🚗 Clientes y vehículos:");
    info!("   GET|POST /api/clientes, GET|PUT /api/clientes/:id, GET /api/clientes/placa/:placa");
    info!("   GET  /api/vehiculos/placa/:placa, /api/vehiculos/:id, /api/vehiculos/:id/ordenes");
    info!("🧾 Órdenes:");
    info!("   GET|POST /api/ordenes, GET /api/ordenes/:id");
    info!("   POST /api/ordenes/:id/cobrar, POST /api/ordenes/:id/cancelar");
    info!("📊 Reportes:");
    info!("   GET  /api/reportes/cierre-caja, /comisiones, /estadisticas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
