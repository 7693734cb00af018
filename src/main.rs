use anyhow::Result;
use colored::*;
use dotenvy::dotenv;
use std::io::{self, Write};
use tracing::{error, info};

use driver_route_client::models::bag::{DistributeBags, VerifyBagDistribution};
use driver_route_client::models::pickup::{Pickup, PickupStatus};
use driver_route_client::models::route::{OccupancyFilter, RouteQuery};
use driver_route_client::{AppState, DriverServices, EnvironmentConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("{}", "🚛 Driver Console".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let config = EnvironmentConfig::from_env()?;
    info!("🌐 Backend: {} ({})", config.api_base_url, config.environment);

    let services = DriverServices::new(&config, AppState::new())?;

    // Paso 1: Login
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;
    match services.session.login(&email, &password).await {
        Ok(user) => println!("{} {}", "✅ Bienvenido".bright_green(), user.name.bold()),
        Err(e) => {
            error!("❌ Login fallido: {}", e);
            println!("{} {}", "❌ Error:".bright_red(), e.user_message());
            return Ok(());
        }
    }

    // Paso 2: Ruta activa actual (best-effort)
    print_active_route(&services).await;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🗺️  Listar rutas");
        println!("2. ➕ Cargar más rutas");
        println!("3. 🔍 Buscar rutas");
        println!("4. 🚦 Activar ruta");
        println!("5. 🛑 Desactivar ruta");
        println!("6. 📦 Pickups de la ruta activa");
        println!("7. 🛍️  Estadísticas de bolsas");
        println!("8. 📊 Panel del conductor");
        println!("9. 🎁 Entregar bolsas a un cliente");
        println!("10. 🚪 Salir");

        match prompt("Selecciona una opción (1-10): ")?.as_str() {
            "1" => {
                if let Err(e) = services.routes.refresh().await {
                    println!("{} {}", "❌ Error:".bright_red(), e.user_message());
                }
                print_routes(&services, &RouteQuery::default()).await;
            }
            "2" => match services.routes.load_more().await {
                Ok(0) => println!("{}", "No hay más rutas".yellow()),
                Ok(_) => print_routes(&services, &RouteQuery::default()).await,
                Err(e) => println!("{} {}", "❌ Error:".bright_red(), e.user_message()),
            },
            "3" => {
                let search = prompt("Texto (vacío = todas): ")?;
                let occupancy = match prompt("Filtro [a]ll / [e]mpty / [o]ccupied: ")?.as_str() {
                    "e" => OccupancyFilter::Empty,
                    "o" => OccupancyFilter::Occupied,
                    _ => OccupancyFilter::All,
                };
                print_routes(&services, &RouteQuery { search, occupancy }).await;
            }
            "4" => {
                let route_id = prompt("Route id: ")?;
                match services.activation.activate(&route_id).await {
                    Ok(route) => println!("{} {}", "✅ Ruta activa:".bright_green(), route.name.bold()),
                    Err(e) => println!("{} {}", format!("❌ {}:", e.title()).bright_red(), e.user_message()),
                }
            }
            "5" => {
                let route_id = prompt("Route id: ")?;
                match services.activation.deactivate(&route_id).await {
                    Ok(()) => println!("{}", "✅ Ruta desactivada".bright_green()),
                    Err(e) => println!("{} {}", format!("❌ {}:", e.title()).bright_red(), e.user_message()),
                }
            }
            "6" => pickups_menu(&services).await?,
            "7" => match services.bags.stats().await {
                Ok(stats) => println!(
                    "🛍️  Asignadas: {}  Usadas: {}  Disponibles: {}",
                    stats.allocated_bags, stats.used_bags, stats.available_bags
                ),
                Err(e) => println!("{} {}", "❌ Error:".bright_red(), e.user_message()),
            },
            "8" => match services.stats.fetch().await {
                Ok(stats) => {
                    println!(
                        "📊 Hoy: {}  Completadas: {}  Pendientes: {}  Rutas: {}",
                        stats.today_pickups, stats.completed_pickups, stats.pending_pickups, stats.total_routes
                    );
                    println!(
                        "📍 {}",
                        stats.active_route.as_deref().unwrap_or("No active route")
                    );
                }
                Err(e) => println!("{} {}", "❌ Error:".bright_red(), e.user_message()),
            },
            "9" => distribution_menu(&services).await?,
            "10" => {
                services.session.logout().await;
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn print_active_route(services: &DriverServices) {
    match services.activation.fetch_active_route().await {
        Some(route) => println!("{} {} ({})", "📍 Ruta activa:".bright_cyan(), route.name.bold(), route.id),
        None => println!("{}", "📍 No active route".bright_cyan()),
    }
}

async fn print_routes(services: &DriverServices, query: &RouteQuery) {
    let driver_id = services.session.current_driver_id().await.unwrap_or_default();
    let routes = services.routes.visible_routes(query).await;
    if routes.is_empty() {
        println!("{}", "No routes found".yellow());
        return;
    }

    for route in routes {
        let status = if route.is_driven_by(&driver_id) {
            "You are in this route".bright_green()
        } else if let Some(driver) = &route.active_driver {
            format!("Driver: {}", driver.name).yellow()
        } else if route.is_occupied() {
            "Occupied".yellow()
        } else {
            "Route is empty".normal()
        };
        println!("• {} [{}] {} - {}", route.name.bold(), route.id, route.path, status);
    }
}

async fn pickups_menu(services: &DriverServices) -> Result<()> {
    let Some(route) = services.activation.active_route().await else {
        println!("{}", "📍 No active route".bright_cyan());
        return Ok(());
    };

    let pickups: Vec<Pickup> = match services
        .pickups
        .list_for_route(&route.id, Some(PickupStatus::Unpicked))
        .await
    {
        Ok(pickups) => pickups,
        Err(e) => {
            println!("{} {}", "❌ Error:".bright_red(), e.user_message());
            return Ok(());
        }
    };

    for (index, pickup) in pickups.iter().enumerate() {
        let marker = if services.pickups.can_complete(pickup).await { "☐" } else { "🔒" };
        println!(
            "{} {}. {} {}",
            marker,
            index + 1,
            pickup.client_name().bold(),
            pickup.address()
        );
    }

    let choice = prompt("Número a completar (vacío = volver): ")?;
    let Some(pickup) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| pickups.get(i))
    else {
        return Ok(());
    };

    let notes = prompt("Notas: ")?;
    match services.pickups.complete(pickup, &notes).await {
        Ok(_) => println!("{}", "✅ Pickup marked as completed".bright_green()),
        Err(e) => println!("{} {}", "❌ Error:".bright_red(), e),
    }
    Ok(())
}

async fn distribution_menu(services: &DriverServices) -> Result<()> {
    let client_id = prompt("Client id: ")?;
    let recipient_email = prompt("Email del receptor: ")?;
    let Ok(number_of_bags) = prompt("Número de bolsas: ")?.parse::<u32>() else {
        println!("{}", "❌ Número de bolsas inválido".bright_red());
        return Ok(());
    };

    let request = DistributeBags {
        client_id,
        recipient_email,
        number_of_bags,
        notes: None,
    };
    let distribution = match services.bags.distribute(&request).await {
        Ok(distribution) => distribution,
        Err(e) => {
            println!("{} {}", "❌ Error:".bright_red(), e.user_message());
            return Ok(());
        }
    };
    if distribution.email_sent {
        println!("{}", "📧 Verification code sent to recipient".bright_green());
    } else {
        println!("{}", "⚠️ Bag distribution created (email failed)".yellow());
    }

    let verification_code = prompt("Código de verificación (vacío = más tarde): ")?;
    if verification_code.is_empty() {
        return Ok(());
    }
    let verify = VerifyBagDistribution {
        distribution_id: distribution.distribution_id,
        verification_code,
    };
    match services.bags.verify_distribution(&verify).await {
        Ok(_) => println!("{}", "✅ Bag distribution verified successfully".bright_green()),
        Err(e) => println!("{} {}", "❌ Error:".bright_red(), e.user_message()),
    }
    Ok(())
}
