//! Contador de fidelización por vehículo
//!
//! El contador cuenta los lavados pagados desde el último lavado gratis.
//! Cuando el lavado que se está completando alcanza el umbral del punto,
//! ese lavado es gratis y el contador vuelve a cero.

/// Umbral por defecto: la décima es gratis
pub const UMBRAL_POR_DEFECTO: i32 = 10;

/// Resultado de aplicar un lavado completado al contador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultadoFidelizacion {
    pub contador_anterior: i32,
    pub contador_nuevo: i32,
    pub es_gratis: bool,
}

/// Aplicar un lavado completado al contador del vehículo
pub fn registrar_lavado(contador_actual: i32, umbral: i32) -> ResultadoFidelizacion {
    let umbral = umbral.max(2);
    let contador_anterior = contador_actual.clamp(0, umbral - 1);
    let siguiente = contador_anterior + 1;
    let es_gratis = siguiente >= umbral;

    ResultadoFidelizacion {
        contador_anterior,
        contador_nuevo: if es_gratis { 0 } else { siguiente },
        es_gratis,
    }
}

/// Indica si el próximo lavado del vehículo será gratis, sin modificar nada
pub fn proximo_es_gratis(contador_actual: i32, umbral: i32) -> bool {
    registrar_lavado(contador_actual, umbral).es_gratis
}

/// Lavados que faltan para el lavado gratis (0 si el próximo es gratis)
pub fn lavados_restantes(contador_actual: i32, umbral: i32) -> i32 {
    let umbral = umbral.max(2);
    (umbral - 1 - contador_actual.clamp(0, umbral - 1)).max(0)
}

/// Contador inicial de un vehículo nuevo a partir de los lavados iniciales del cliente
pub fn contador_inicial(lavados_iniciales: i32, umbral: i32) -> i32 {
    lavados_iniciales.clamp(0, umbral.max(2) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incrementa_contador() {
        let r = registrar_lavado(0, UMBRAL_POR_DEFECTO);
        assert_eq!(r.contador_nuevo, 1);
        assert!(!r.es_gratis);

        let r = registrar_lavado(7, UMBRAL_POR_DEFECTO);
        assert_eq!(r.contador_nuevo, 8);
        assert!(!r.es_gratis);
    }

    #[test]
    fn test_decima_gratis_reinicia() {
        let r = registrar_lavado(9, UMBRAL_POR_DEFECTO);
        assert!(r.es_gratis);
        assert_eq!(r.contador_anterior, 9);
        assert_eq!(r.contador_nuevo, 0);
    }

    #[test]
    fn test_ciclo_completo() {
        let mut contador = 0;
        let mut gratis = Vec::new();
        for lavado in 1..=25 {
            let r = registrar_lavado(contador, UMBRAL_POR_DEFECTO);
            if r.es_gratis {
                gratis.push(lavado);
            }
            contador = r.contador_nuevo;
            assert!((0..=9).contains(&contador));
        }
        assert_eq!(gratis, vec![10, 20]);
        assert_eq!(contador, 5);
    }

    #[test]
    fn test_contador_fuera_de_rango_se_acota() {
        let r = registrar_lavado(15, UMBRAL_POR_DEFECTO);
        assert_eq!(r.contador_anterior, 9);
        assert!(r.es_gratis);

        let r = registrar_lavado(-3, UMBRAL_POR_DEFECTO);
        assert_eq!(r.contador_nuevo, 1);
    }

    #[test]
    fn test_umbral_personalizado() {
        assert!(proximo_es_gratis(4, 5));
        assert!(!proximo_es_gratis(3, 5));
        assert_eq!(lavados_restantes(3, 5), 1);
        assert_eq!(lavados_restantes(0, UMBRAL_POR_DEFECTO), 9);
        assert_eq!(lavados_restantes(9, UMBRAL_POR_DEFECTO), 0);
    }

    #[test]
    fn test_contador_inicial() {
        assert_eq!(contador_inicial(0, UMBRAL_POR_DEFECTO), 0);
        assert_eq!(contador_inicial(9, UMBRAL_POR_DEFECTO), 9);
        assert_eq!(contador_inicial(9, 5), 4);
        assert_eq!(contador_inicial(-1, UMBRAL_POR_DEFECTO), 0);
    }
}
